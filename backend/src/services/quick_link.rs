//! Quick link management service

use chrono::{DateTime, Utc};
use shared::{NewQuickLink, QuickLink, QuickLinkUpdate};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct QuickLinkService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct QuickLinkRow {
    id: i32,
    name: String,
    url: String,
    description: Option<String>,
    icon: Option<String>,
    category: String,
    created_at: DateTime<Utc>,
}

impl From<QuickLinkRow> for QuickLink {
    fn from(row: QuickLinkRow) -> Self {
        QuickLink {
            id: row.id,
            name: row.name,
            url: row.url,
            description: row.description,
            icon: row.icon,
            category: row.category,
            created_at: row.created_at,
        }
    }
}

impl QuickLinkService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List quick links ordered by id, optionally restricted to one category
    pub async fn list(&self, category: Option<&str>) -> AppResult<Vec<QuickLink>> {
        let rows = match category {
            Some(category) => {
                sqlx::query_as::<_, QuickLinkRow>(
                    r#"
                    SELECT id, name, url, description, icon, category, created_at
                    FROM quick_links
                    WHERE category = $1
                    ORDER BY id ASC
                    "#,
                )
                .bind(category)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, QuickLinkRow>(
                    r#"
                    SELECT id, name, url, description, icon, category, created_at
                    FROM quick_links
                    ORDER BY id ASC
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(QuickLink::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<QuickLink> {
        let row = sqlx::query_as::<_, QuickLinkRow>(
            r#"
            SELECT id, name, url, description, icon, category, created_at
            FROM quick_links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quick link".to_string()))?;

        Ok(row.into())
    }

    pub async fn create(&self, input: NewQuickLink) -> AppResult<QuickLink> {
        let input = input.validated()?;

        let row = sqlx::query_as::<_, QuickLinkRow>(
            r#"
            INSERT INTO quick_links (name, url, description, icon, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, url, description, icon, category, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(input.category_or_default())
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    pub async fn update(&self, id: i32, patch: QuickLinkUpdate) -> AppResult<QuickLink> {
        let current = self.get(id).await?;
        let merged = patch.apply(current.to_new())?;

        let row = sqlx::query_as::<_, QuickLinkRow>(
            r#"
            UPDATE quick_links
            SET name = $2, url = $3, description = $4, icon = $5, category = $6
            WHERE id = $1
            RETURNING id, name, url, description, icon, category, created_at
            "#,
        )
        .bind(id)
        .bind(&merged.name)
        .bind(&merged.url)
        .bind(&merged.description)
        .bind(&merged.icon)
        .bind(merged.category_or_default())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quick link".to_string()))?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM quick_links WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Quick link".to_string()));
        }

        Ok(())
    }
}
