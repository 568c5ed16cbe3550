//! Service category models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    normalize_optional, patch_optional, patch_required, validate_hex_color, validate_required,
    ValidationResult,
};

/// Badge color used when a category is created without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

/// A named grouping for services, with a display color
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn to_new(&self) -> NewCategory {
        NewCategory {
            name: self.name.clone(),
            description: self.description.clone(),
            color: Some(self.color.clone()),
        }
    }
}

/// Input for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewCategory {
    pub fn validated(self) -> ValidationResult<Self> {
        let color = match normalize_optional(self.color) {
            Some(color) => validate_hex_color("color", &color)?,
            None => DEFAULT_CATEGORY_COLOR.to_string(),
        };

        Ok(Self {
            name: validate_required("name", &self.name)?,
            description: normalize_optional(self.description),
            color: Some(color),
        })
    }

    /// Color to store, falling back to the default
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR)
    }
}

/// Partial update for a category
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl CategoryUpdate {
    pub fn apply(self, current: NewCategory) -> ValidationResult<NewCategory> {
        // A cleared color resets to the default
        let color = match self.color.map(|c| normalize_optional(Some(c))) {
            None => current.color,
            Some(None) => Some(DEFAULT_CATEGORY_COLOR.to_string()),
            Some(Some(color)) => Some(validate_hex_color("color", &color)?),
        };

        Ok(NewCategory {
            name: patch_required("name", current.name, self.name)?,
            description: patch_optional(current.description, self.description),
            color,
        })
    }
}
