//! Quick link models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    normalize_optional, patch_optional, patch_required, validate_http_url, validate_required,
    ValidationResult,
};

pub const DEFAULT_QUICK_LINK_CATEGORY: &str = "General";

/// A bookmark shown in the quick links panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickLink {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    /// Icon name or image URL
    pub icon: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl QuickLink {
    pub fn to_new(&self) -> NewQuickLink {
        NewQuickLink {
            name: self.name.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            category: Some(self.category.clone()),
        }
    }
}

/// Input for creating a quick link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewQuickLink {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewQuickLink {
    pub fn validated(self) -> ValidationResult<Self> {
        Ok(Self {
            name: validate_required("name", &self.name)?,
            url: validate_http_url("url", &self.url)?,
            description: normalize_optional(self.description),
            icon: normalize_optional(self.icon),
            category: Some(
                normalize_optional(self.category)
                    .unwrap_or_else(|| DEFAULT_QUICK_LINK_CATEGORY.to_string()),
            ),
        })
    }

    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_QUICK_LINK_CATEGORY)
    }
}

/// Partial update for a quick link
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickLinkUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

impl QuickLinkUpdate {
    pub fn apply(self, current: NewQuickLink) -> ValidationResult<NewQuickLink> {
        let url = match self.url {
            None => current.url,
            Some(url) => validate_http_url("url", &url)?,
        };
        // A cleared category falls back to the default rather than NULL
        let category = match self.category {
            None => current.category,
            Some(category) => Some(
                normalize_optional(Some(category))
                    .unwrap_or_else(|| DEFAULT_QUICK_LINK_CATEGORY.to_string()),
            ),
        };

        Ok(NewQuickLink {
            name: patch_required("name", current.name, self.name)?,
            url,
            description: patch_optional(current.description, self.description),
            icon: patch_optional(current.icon, self.icon),
            category,
        })
    }
}

/// Query parameters accepted by the quick link listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuickLinkQuery {
    pub category: Option<String>,
}
