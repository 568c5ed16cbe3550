//! Service catalog: CRUD, search and status bookkeeping for dashboard services

use chrono::{DateTime, Utc};
use shared::{NewService, Service, ServiceFilter, ServiceQuery, ServiceStatus, ServiceUpdate};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

const SERVICE_COLUMNS: &str = "id, name, url, category, description, provider, status, port, \
                               location, icon, hidden, last_checked, created_at";

/// Catalog service for managing dashboard services
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Database row for a service
#[derive(Debug, Clone, sqlx::FromRow)]
struct ServiceRow {
    id: i32,
    name: String,
    url: String,
    category: String,
    description: Option<String>,
    provider: Option<String>,
    status: String,
    port: Option<String>,
    location: Option<String>,
    icon: Option<String>,
    hidden: bool,
    last_checked: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        let status: ServiceStatus = row.status.parse().unwrap_or_else(|e| {
            tracing::warn!("Service {} has {}; treating as unknown", row.id, e);
            ServiceStatus::Unknown
        });

        Service {
            id: row.id,
            name: row.name,
            url: row.url,
            category: row.category,
            description: row.description,
            provider: row.provider,
            status,
            port: row.port,
            location: row.location,
            icon: row.icon,
            hidden: row.hidden,
            last_checked: row.last_checked,
            created_at: row.created_at,
        }
    }
}

/// SELECT for the visible service list. Hidden services never appear; the
/// filter value, if any, is bound as `$1`.
fn list_statement(filter: &ServiceFilter) -> String {
    let condition = match filter {
        ServiceFilter::All => "",
        ServiceFilter::Category(_) => " AND category = $1",
        ServiceFilter::Search { .. } => {
            " AND (name ILIKE $1 OR description ILIKE $1 OR provider ILIKE $1 OR category ILIKE $1)"
        }
    };

    format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE hidden = FALSE{condition} ORDER BY id ASC"
    )
}

/// Minimal projection used by the status checker
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProbeTarget {
    pub id: i32,
    pub url: String,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List visible services, filtered by search term or category.
    ///
    /// A search term takes precedence over the category filter.
    pub async fn list(&self, query: &ServiceQuery) -> AppResult<Vec<Service>> {
        let filter = query.filter();
        let sql = list_statement(&filter);

        let rows = match filter {
            ServiceFilter::All => {
                sqlx::query_as::<_, ServiceRow>(&sql)
                    .fetch_all(&self.db)
                    .await?
            }
            ServiceFilter::Category(value) | ServiceFilter::Search { pattern: value } => {
                sqlx::query_as::<_, ServiceRow>(&sql)
                    .bind(value)
                    .fetch_all(&self.db)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Service::from).collect())
    }

    /// List services marked as hidden
    pub async fn list_hidden(&self) -> AppResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE hidden = TRUE ORDER BY id ASC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    /// Get a service by ID
    pub async fn get(&self, id: i32) -> AppResult<Service> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Service".to_string()))?;

        Ok(row.into())
    }

    /// Create a new service with status `unknown`
    pub async fn create(&self, input: NewService) -> AppResult<Service> {
        let input = input.validated()?;

        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            r#"
            INSERT INTO services (name, url, category, description, provider, port, location, icon, hidden)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.category)
        .bind(&input.description)
        .bind(&input.provider)
        .bind(&input.port)
        .bind(&input.location)
        .bind(&input.icon)
        .bind(input.hidden)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created service {} ({})", row.id, row.name);
        Ok(row.into())
    }

    /// Apply a partial update to a service
    pub async fn update(&self, id: i32, patch: ServiceUpdate) -> AppResult<Service> {
        let current = self.get(id).await?;
        let merged = patch.apply(current.to_new())?;

        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            r#"
            UPDATE services
            SET name = $2, url = $3, category = $4, description = $5, provider = $6,
                port = $7, location = $8, icon = $9, hidden = $10
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&merged.name)
        .bind(&merged.url)
        .bind(&merged.category)
        .bind(&merged.description)
        .bind(&merged.provider)
        .bind(&merged.port)
        .bind(&merged.location)
        .bind(&merged.icon)
        .bind(merged.hidden)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Service".to_string()))?;

        Ok(row.into())
    }

    /// Delete a service
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Service".to_string()));
        }

        tracing::info!("Deleted service {}", id);
        Ok(())
    }

    /// Store the outcome of a reachability check
    pub async fn record_status(&self, id: i32, status: ServiceStatus) -> AppResult<()> {
        sqlx::query("UPDATE services SET status = $2, last_checked = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Every service URL, hidden ones included
    pub async fn probe_targets(&self) -> AppResult<Vec<ProbeTarget>> {
        let targets =
            sqlx::query_as::<_, ProbeTarget>("SELECT id, url FROM services ORDER BY id ASC")
                .fetch_all(&self.db)
                .await?;

        Ok(targets)
    }
}
