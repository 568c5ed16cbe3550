//! Monitored service models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ServiceStatus;
use crate::validation::{
    normalize_optional, patch_optional, patch_required, validate_http_url, validate_required,
    ValidationResult,
};

/// Category filter value meaning "no filter"
pub const ALL_CATEGORIES: &str = "All";

/// A self-hosted or VPS service shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub url: String,
    /// Free-form grouping such as VPS, Docker, External or Network
    pub category: String,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub status: ServiceStatus,
    pub port: Option<String>,
    pub location: Option<String>,
    pub icon: Option<String>,
    pub hidden: bool,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Editable fields of this service
    pub fn to_new(&self) -> NewService {
        NewService {
            name: self.name.clone(),
            url: self.url.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            provider: self.provider.clone(),
            port: self.port.clone(),
            location: self.location.clone(),
            icon: self.icon.clone(),
            hidden: self.hidden,
        }
    }
}

/// Input for creating a service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub url: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl NewService {
    /// Trim and check required fields, turn blank optional fields into None
    pub fn validated(self) -> ValidationResult<Self> {
        Ok(Self {
            name: validate_required("name", &self.name)?,
            url: validate_http_url("url", &self.url)?,
            category: validate_required("category", &self.category)?,
            description: normalize_optional(self.description),
            provider: normalize_optional(self.provider),
            port: normalize_optional(self.port),
            location: normalize_optional(self.location),
            icon: normalize_optional(self.icon),
            hidden: self.hidden,
        })
    }
}

/// Partial update for a service. Absent fields are left unchanged and blank
/// optional fields are cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub port: Option<String>,
    pub location: Option<String>,
    pub icon: Option<String>,
    pub hidden: Option<bool>,
}

impl ServiceUpdate {
    /// Merge this patch onto the current values
    pub fn apply(self, current: NewService) -> ValidationResult<NewService> {
        let url = match self.url {
            None => current.url,
            Some(url) => validate_http_url("url", &url)?,
        };

        Ok(NewService {
            name: patch_required("name", current.name, self.name)?,
            url,
            category: patch_required("category", current.category, self.category)?,
            description: patch_optional(current.description, self.description),
            provider: patch_optional(current.provider, self.provider),
            port: patch_optional(current.port, self.port),
            location: patch_optional(current.location, self.location),
            icon: patch_optional(current.icon, self.icon),
            hidden: self.hidden.unwrap_or(current.hidden),
        })
    }
}

/// Query parameters accepted by the service listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ServiceQuery {
    /// The non-blank search term, if any
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// The category filter, with "All" and blank meaning none
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    /// Resolve the listing filter. A search term wins over a category.
    pub fn filter(&self) -> ServiceFilter {
        if let Some(term) = self.search_term() {
            ServiceFilter::Search {
                pattern: contains_pattern(term),
            }
        } else if let Some(category) = self.category_filter() {
            ServiceFilter::Category(category.to_string())
        } else {
            ServiceFilter::All
        }
    }
}

/// How the visible service list is narrowed down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFilter {
    All,
    /// Exact category name
    Category(String),
    /// Escaped `ILIKE` pattern matched against name, description, provider
    /// and category
    Search { pattern: String },
}

/// Build a SQL `LIKE` pattern matching `query` anywhere, with wildcards in
/// the query itself escaped so they match literally.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Result of probing one service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheckResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub status: ServiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Service {
        Service {
            id: 1,
            name: "Jellyfin".to_string(),
            url: "http://10.0.0.5:8096".to_string(),
            category: "Docker".to_string(),
            description: Some("Media server".to_string()),
            provider: None,
            status: ServiceStatus::Unknown,
            port: Some("8096".to_string()),
            location: None,
            icon: None,
            hidden: false,
            last_checked: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_service_validation_blanks_become_none() {
        let input = NewService {
            name: " Pi-hole ".to_string(),
            url: "http://pi.hole/admin".to_string(),
            category: "Network".to_string(),
            description: Some("".to_string()),
            provider: Some("  ".to_string()),
            port: Some("80".to_string()),
            location: None,
            icon: None,
            hidden: false,
        };
        let validated = input.validated().unwrap();
        assert_eq!(validated.name, "Pi-hole");
        assert_eq!(validated.description, None);
        assert_eq!(validated.provider, None);
        assert_eq!(validated.port, Some("80".to_string()));
    }

    #[test]
    fn test_new_service_requires_url() {
        let input = NewService {
            name: "Broken".to_string(),
            url: "not a url".to_string(),
            category: "VPS".to_string(),
            description: None,
            provider: None,
            port: None,
            location: None,
            icon: None,
            hidden: false,
        };
        assert_eq!(input.validated().unwrap_err().field, "url");
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let current = service().to_new();
        let patch = ServiceUpdate {
            hidden: Some(true),
            ..Default::default()
        };
        let merged = patch.apply(current.clone()).unwrap();
        assert!(merged.hidden);
        assert_eq!(merged.description, current.description);
        assert_eq!(merged.port, current.port);
    }

    #[test]
    fn test_update_clears_blank_optional() {
        let patch = ServiceUpdate {
            description: Some(String::new()),
            ..Default::default()
        };
        let merged = patch.apply(service().to_new()).unwrap();
        assert_eq!(merged.description, None);
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let patch = ServiceUpdate {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(patch.apply(service().to_new()).is_err());
    }

    #[test]
    fn test_update_deserializes_camel_case() {
        let patch: ServiceUpdate =
            serde_json::from_str(r#"{"name":"Plex","hidden":true}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Plex"));
        assert_eq!(patch.hidden, Some(true));
        assert!(patch.url.is_none());
    }

    #[test]
    fn test_query_filters() {
        let query = ServiceQuery {
            category: Some("All".to_string()),
            search: Some("  ".to_string()),
        };
        assert_eq!(query.category_filter(), None);
        assert_eq!(query.search_term(), None);

        let query = ServiceQuery {
            category: Some("VPS".to_string()),
            search: Some(" plex ".to_string()),
        };
        assert_eq!(query.category_filter(), Some("VPS"));
        assert_eq!(query.search_term(), Some("plex"));
    }

    #[test]
    fn test_filter_prefers_search_over_category() {
        let query = ServiceQuery {
            category: Some("VPS".to_string()),
            search: Some("50%".to_string()),
        };
        assert_eq!(
            query.filter(),
            ServiceFilter::Search {
                pattern: "%50\\%%".to_string()
            }
        );
    }

    #[test]
    fn test_filter_category_and_all() {
        let query = ServiceQuery {
            category: Some("Docker".to_string()),
            search: None,
        };
        assert_eq!(query.filter(), ServiceFilter::Category("Docker".to_string()));
        assert_eq!(ServiceQuery::default().filter(), ServiceFilter::All);
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("plex"), "%plex%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("my_app"), "%my\\_app%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_service_serializes_camel_case() {
        let json = serde_json::to_value(service()).unwrap();
        assert!(json.get("lastChecked").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "unknown");
    }
}
