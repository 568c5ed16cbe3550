//! RSS feed fetching and item extraction
//!
//! Items are pulled out with regular expressions, so malformed XML still
//! yields whatever complete `<item>` elements it contains.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client};
use shared::RssItem;

use crate::config::RssConfig;
use crate::error::{AppError, AppResult};

const ACCEPT_FEED: &str = "application/rss+xml, application/xml, text/xml";

static ITEM_RE: Lazy<Regex> = Lazy::new(|| tag_regex("item"));
static TITLE_CDATA_RE: Lazy<Regex> = Lazy::new(|| cdata_regex("title"));
static TITLE_RE: Lazy<Regex> = Lazy::new(|| tag_regex("title"));
static LINK_RE: Lazy<Regex> = Lazy::new(|| tag_regex("link"));
static DESCRIPTION_CDATA_RE: Lazy<Regex> = Lazy::new(|| cdata_regex("description"));
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| tag_regex("description"));
static PUB_DATE_RE: Lazy<Regex> = Lazy::new(|| tag_regex("pubDate"));
static GUID_RE: Lazy<Regex> = Lazy::new(|| tag_regex("guid"));
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}[^>]*>(.*?)</{tag}>")).expect("valid regex")
}

fn cdata_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}[^>]*><!\[CDATA\[(.*?)\]\]></{tag}>")).expect("valid regex")
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Limits applied while extracting items
#[derive(Debug, Clone, Copy)]
pub struct ExtractLimits {
    pub max_items: usize,
    pub description_chars: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self {
            max_items: 10,
            description_chars: 200,
        }
    }
}

/// Extract items from an RSS document.
///
/// Only the first `max_items` `<item>` elements are considered; items without
/// a title are dropped. Descriptions lose their HTML markup and are truncated.
pub fn parse_rss_items(xml: &str, limits: ExtractLimits) -> Vec<RssItem> {
    ITEM_RE
        .captures_iter(xml)
        .take(limits.max_items)
        .enumerate()
        .filter_map(|(index, caps)| {
            let item = caps.get(1).map_or("", |m| m.as_str());

            let title = capture(&TITLE_CDATA_RE, item)
                .or_else(|| capture(&TITLE_RE, item))
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            if title.is_empty() {
                return None;
            }

            let description = capture(&DESCRIPTION_CDATA_RE, item)
                .or_else(|| capture(&DESCRIPTION_RE, item))
                .unwrap_or_default();
            let description = HTML_TAG_RE.replace_all(description, "");
            let description: String = description
                .trim()
                .chars()
                .take(limits.description_chars)
                .collect();

            Some(RssItem {
                title,
                link: capture(&LINK_RE, item).unwrap_or_default().trim().to_string(),
                description,
                pub_date: capture(&PUB_DATE_RE, item).unwrap_or_default().to_string(),
                guid: capture(&GUID_RE, item)
                    .map(str::to_string)
                    .unwrap_or_else(|| index.to_string()),
                feed_name: None,
            })
        })
        .collect()
}

/// HTTP client for RSS feeds
#[derive(Clone)]
pub struct RssClient {
    client: Client,
    user_agent: String,
    timeout: Duration,
    limits: ExtractLimits,
}

impl RssClient {
    pub fn new(client: Client, config: &RssConfig) -> Self {
        Self {
            client,
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            limits: ExtractLimits {
                max_items: config.max_items_per_feed,
                description_chars: config.description_limit,
            },
        }
    }

    /// Fetch a feed and extract its items
    pub async fn fetch_items(&self, url: &str) -> AppResult<Vec<RssItem>> {
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, ACCEPT_FEED)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Feed request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "Feed returned HTTP {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to read feed: {}", e)))?;

        Ok(parse_rss_items(&body, self.limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Homelab Weekly</title>
    <item>
      <title><![CDATA[Proxmox 9 released]]></title>
      <link>
        https://example.com/proxmox-9
      </link>
      <description><![CDATA[<p>The <b>new</b> release brings ZFS improvements.</p>]]></description>
      <pubDate>Wed, 04 Jun 2025 10:00:00 +0000</pubDate>
      <guid isPermaLink="false">pve-9</guid>
    </item>
    <item>
      <title>Tailscale &amp; WireGuard</title>
      <link>https://example.com/tailscale</link>
      <description>Plain text summary</description>
    </item>
    <item>
      <title></title>
      <link>https://example.com/untitled</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_extracts_cdata_and_plain_items() {
        let items = parse_rss_items(FEED, ExtractLimits::default());
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Proxmox 9 released");
        assert_eq!(items[0].link, "https://example.com/proxmox-9");
        assert_eq!(items[0].description, "The new release brings ZFS improvements.");
        assert_eq!(items[0].pub_date, "Wed, 04 Jun 2025 10:00:00 +0000");
        assert_eq!(items[0].guid, "pve-9");

        assert_eq!(items[1].title, "Tailscale &amp; WireGuard");
        assert_eq!(items[1].description, "Plain text summary");
        assert_eq!(items[1].pub_date, "");
    }

    #[test]
    fn test_escaped_markup_in_description_is_kept() {
        let xml = "<item><title>Tips</title>\
                   <description>Use &lt;br&gt; for breaks</description></item>";
        let items = parse_rss_items(xml, ExtractLimits::default());
        assert_eq!(items[0].description, "Use &lt;br&gt; for breaks");
    }

    #[test]
    fn test_guid_falls_back_to_index() {
        let items = parse_rss_items(FEED, ExtractLimits::default());
        assert_eq!(items[1].guid, "1");
    }

    #[test]
    fn test_item_limit_applies_before_filtering() {
        let limits = ExtractLimits {
            max_items: 1,
            description_chars: 200,
        };
        let items = parse_rss_items(FEED, limits);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].guid, "pve-9");
    }

    #[test]
    fn test_description_truncated_on_char_boundary() {
        let xml = format!(
            "<item><title>Long</title><description>{}</description></item>",
            "é".repeat(300)
        );
        let items = parse_rss_items(&xml, ExtractLimits::default());
        assert_eq!(items[0].description.chars().count(), 200);
    }

    #[test]
    fn test_no_items() {
        assert!(parse_rss_items("<rss><channel></channel></rss>", ExtractLimits::default()).is_empty());
        assert!(parse_rss_items("not xml at all", ExtractLimits::default()).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_items_sends_feed_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/feed")
            .match_header("user-agent", "Mozilla/5.0 (compatible; RSS Reader)")
            .match_header("accept", ACCEPT_FEED)
            .with_status(200)
            .with_header("content-type", "application/rss+xml")
            .with_body(FEED)
            .create_async()
            .await;

        let config = crate::config::Config::for_tests(&server.url());
        let client = RssClient::new(Client::new(), &config.rss);
        let items = client
            .fetch_items(&format!("{}/feed", server.url()))
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_items_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/feed")
            .with_status(404)
            .create_async()
            .await;

        let config = crate::config::Config::for_tests(&server.url());
        let client = RssClient::new(Client::new(), &config.rss);
        let result = client.fetch_items(&format!("{}/feed", server.url())).await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }
}
