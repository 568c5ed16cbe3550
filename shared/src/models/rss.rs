//! RSS feed subscriptions and extracted items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    normalize_optional, patch_optional, patch_required, validate_http_url, validate_required,
    ValidationResult,
};

/// A subscribed RSS feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RssFeed {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RssFeed {
    pub fn to_new(&self) -> NewRssFeed {
        NewRssFeed {
            name: self.name.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Input for subscribing to a feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRssFeed {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewRssFeed {
    pub fn validated(self) -> ValidationResult<Self> {
        Ok(Self {
            name: validate_required("name", &self.name)?,
            url: validate_http_url("url", &self.url)?,
            description: normalize_optional(self.description),
            is_active: self.is_active,
        })
    }
}

/// Partial update for a feed subscription
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RssFeedUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl RssFeedUpdate {
    pub fn apply(self, current: NewRssFeed) -> ValidationResult<NewRssFeed> {
        let url = match self.url {
            None => current.url,
            Some(url) => validate_http_url("url", &url)?,
        };

        Ok(NewRssFeed {
            name: patch_required("name", current.name, self.name)?,
            url,
            description: patch_optional(current.description, self.description),
            is_active: self.is_active.unwrap_or(current.is_active),
        })
    }
}

/// Query parameters accepted by the feed listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RssFeedQuery {
    pub active: Option<bool>,
}

/// One article extracted from a feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
    pub guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_name: Option<String>,
}

impl RssItem {
    /// Publication time, when the feed provides a valid RFC 2822 date
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc2822(self.pub_date.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Order items newest first; items without a parseable date go last,
/// keeping their relative order.
pub fn sort_newest_first(items: &mut [RssItem]) {
    items.sort_by(|a, b| match (a.published_at(), b.published_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
