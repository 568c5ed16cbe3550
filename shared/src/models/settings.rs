//! Dashboard settings models

use serde::{Deserialize, Serialize};

use crate::validation::{normalize_optional, validate_http_url, ValidationResult};

pub const DEFAULT_GLANCES_URL: &str = "http://localhost:61208";

fn default_enabled() -> bool {
    true
}

fn default_glances_url() -> String {
    DEFAULT_GLANCES_URL.to_string()
}

/// Connection settings for a Glances monitoring instance, as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlancesSettings {
    #[serde(default = "default_glances_url")]
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for GlancesSettings {
    fn default() -> Self {
        Self {
            url: default_glances_url(),
            username: None,
            password: None,
            enabled: false,
        }
    }
}

impl GlancesSettings {
    /// Validate incoming settings, keeping the stored password when none is given
    pub fn merged_with(self, stored: &GlancesSettings) -> ValidationResult<Self> {
        let password = normalize_optional(self.password).or_else(|| stored.password.clone());
        Ok(Self {
            url: validate_http_url("url", &self.url)?
                .trim_end_matches('/')
                .to_string(),
            username: normalize_optional(self.username),
            password,
            enabled: self.enabled,
        })
    }

    /// Settings as returned to the browser, without the password
    pub fn to_view(&self) -> GlancesSettingsView {
        GlancesSettingsView {
            url: self.url.clone(),
            username: self.username.clone(),
            has_password: self.password.is_some(),
            enabled: self.enabled,
        }
    }
}

/// Public view of the Glances settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlancesSettingsView {
    pub url: String,
    pub username: Option<String>,
    pub has_password: bool,
    pub enabled: bool,
}

/// Outcome of a Glances connection test
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionTestResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_hides_password() {
        let settings = GlancesSettings {
            url: DEFAULT_GLANCES_URL.to_string(),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            enabled: true,
        };
        let json = serde_json::to_string(&settings.to_view()).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"hasPassword\":true"));
    }

    #[test]
    fn test_blank_password_keeps_stored() {
        let stored = GlancesSettings {
            password: Some("secret".to_string()),
            ..Default::default()
        };
        let incoming = GlancesSettings {
            url: "http://nas.lan:61208/".to_string(),
            username: Some("".to_string()),
            password: Some("".to_string()),
            enabled: true,
        };
        let merged = incoming.merged_with(&stored).unwrap();
        assert_eq!(merged.password.as_deref(), Some("secret"));
        assert_eq!(merged.username, None);
        assert_eq!(merged.url, "http://nas.lan:61208");
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let settings: GlancesSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.url, DEFAULT_GLANCES_URL);
        assert!(settings.enabled);
    }
}
