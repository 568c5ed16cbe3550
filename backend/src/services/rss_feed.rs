//! RSS feed subscriptions and aggregation

use chrono::{DateTime, Utc};
use futures::future::join_all;
use shared::{sort_newest_first, NewRssFeed, RssFeed, RssFeedUpdate, RssItem};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::external::RssClient;

/// RSS feed service: subscription CRUD plus fetching of feed items
#[derive(Clone)]
pub struct RssFeedService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct RssFeedRow {
    id: i32,
    name: String,
    url: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RssFeedRow> for RssFeed {
    fn from(row: RssFeedRow) -> Self {
        RssFeed {
            id: row.id,
            name: row.name,
            url: row.url,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Merge per-feed results into one list, newest first.
///
/// Failed feeds are logged and skipped; each surviving item is tagged with
/// the name of the feed it came from.
pub fn combine_feed_items(
    results: Vec<(String, AppResult<Vec<RssItem>>)>,
    limit: usize,
) -> Vec<RssItem> {
    let mut combined = Vec::new();

    for (feed_name, result) in results {
        match result {
            Ok(items) => combined.extend(items.into_iter().map(|mut item| {
                item.feed_name = Some(feed_name.clone());
                item
            })),
            Err(e) => tracing::warn!("Skipping feed '{}': {}", feed_name, e),
        }
    }

    sort_newest_first(&mut combined);
    combined.truncate(limit);
    combined
}

impl RssFeedService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List subscriptions ordered by id; `active_only` restricts to enabled feeds
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<RssFeed>> {
        let rows = sqlx::query_as::<_, RssFeedRow>(
            r#"
            SELECT id, name, url, description, is_active, created_at, updated_at
            FROM rss_feeds
            WHERE ($1 = FALSE OR is_active = TRUE)
            ORDER BY id ASC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(RssFeed::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<RssFeed> {
        let row = sqlx::query_as::<_, RssFeedRow>(
            r#"
            SELECT id, name, url, description, is_active, created_at, updated_at
            FROM rss_feeds
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("RSS feed".to_string()))?;

        Ok(row.into())
    }

    pub async fn create(&self, input: NewRssFeed) -> AppResult<RssFeed> {
        let input = input.validated()?;

        let row = sqlx::query_as::<_, RssFeedRow>(
            r#"
            INSERT INTO rss_feeds (name, url, description, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, url, description, is_active, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.description)
        .bind(input.is_active)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Subscribed to feed {} ({})", row.id, row.url);
        Ok(row.into())
    }

    /// Apply a partial update; `updated_at` is always refreshed
    pub async fn update(&self, id: i32, patch: RssFeedUpdate) -> AppResult<RssFeed> {
        let current = self.get(id).await?;
        let merged = patch.apply(current.to_new())?;

        let row = sqlx::query_as::<_, RssFeedRow>(
            r#"
            UPDATE rss_feeds
            SET name = $2, url = $3, description = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, url, description, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&merged.name)
        .bind(&merged.url)
        .bind(&merged.description)
        .bind(merged.is_active)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("RSS feed".to_string()))?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM rss_feeds WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("RSS feed".to_string()));
        }

        Ok(())
    }

    /// Items of a single subscription
    pub async fn feed_items(&self, client: &RssClient, id: i32) -> AppResult<Vec<RssItem>> {
        let feed = self.get(id).await?;
        let mut items = client.fetch_items(&feed.url).await?;
        for item in &mut items {
            item.feed_name = Some(feed.name.clone());
        }
        Ok(items)
    }

    /// Items of every active subscription, fetched concurrently
    pub async fn combined_items(&self, client: &RssClient, limit: usize) -> AppResult<Vec<RssItem>> {
        let feeds = self.list(true).await?;

        let fetches = feeds.iter().map(|feed| async move {
            (feed.name.clone(), client.fetch_items(&feed.url).await)
        });
        let results = join_all(fetches).await;

        Ok(combine_feed_items(results, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, pub_date: &str) -> RssItem {
        RssItem {
            title: title.to_string(),
            link: format!("https://example.com/{}", title),
            description: String::new(),
            pub_date: pub_date.to_string(),
            guid: title.to_string(),
            feed_name: None,
        }
    }

    #[test]
    fn test_combine_tags_and_sorts() {
        let results = vec![
            (
                "LWN".to_string(),
                Ok(vec![item("kernel", "Mon, 02 Jun 2025 08:00:00 +0000")]),
            ),
            (
                "Self-Hosted".to_string(),
                Ok(vec![
                    item("podcast", "Tue, 03 Jun 2025 08:00:00 +0000"),
                    item("undated", ""),
                ]),
            ),
        ];

        let combined = combine_feed_items(results, 50);
        let titles: Vec<_> = combined.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["podcast", "kernel", "undated"]);
        assert_eq!(combined[0].feed_name.as_deref(), Some("Self-Hosted"));
        assert_eq!(combined[1].feed_name.as_deref(), Some("LWN"));
    }

    #[test]
    fn test_combine_skips_failed_feeds() {
        let results = vec![
            (
                "Broken".to_string(),
                Err(AppError::ExternalService("timeout".to_string())),
            ),
            ("Working".to_string(), Ok(vec![item("ok", "")])),
        ];

        let combined = combine_feed_items(results, 50);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].feed_name.as_deref(), Some("Working"));
    }

    #[test]
    fn test_combine_respects_limit() {
        let items = (0..20).map(|i| item(&format!("item{}", i), "")).collect();
        let combined = combine_feed_items(vec![("Feed".to_string(), Ok(items))], 8);
        assert_eq!(combined.len(), 8);
    }
}
