//! Category management service

use chrono::{DateTime, Utc};
use shared::{Category, CategoryUpdate, NewCategory};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Category service for managing service groupings
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    description: Option<String>,
    color: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            color: row.color,
            created_at: row.created_at,
        }
    }
}

/// Category names are unique; report clashes against the field the user edited
fn name_conflict(err: AppError) -> AppError {
    match err {
        AppError::DuplicateEntry(_) => AppError::DuplicateEntry("name".to_string()),
        other => other,
    }
}

impl CategoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, color, created_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, color, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(row.into())
    }

    pub async fn create(&self, input: NewCategory) -> AppResult<Category> {
        let input = input.validated()?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, description, color)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, color, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.color_or_default())
        .fetch_one(&self.db)
        .await
        .map_err(|e| name_conflict(e.into()))?;

        Ok(row.into())
    }

    pub async fn update(&self, id: i32, patch: CategoryUpdate) -> AppResult<Category> {
        let current = self.get(id).await?;
        let merged = patch.apply(current.to_new())?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $2, description = $3, color = $4
            WHERE id = $1
            RETURNING id, name, description, color, created_at
            "#,
        )
        .bind(id)
        .bind(&merged.name)
        .bind(&merged.description)
        .bind(merged.color_or_default())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| name_conflict(e.into()))?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_conflict_rewrites_duplicate() {
        let err = name_conflict(AppError::DuplicateEntry("categories_name_key".into()));
        assert!(matches!(err, AppError::DuplicateEntry(field) if field == "name"));
    }

    #[test]
    fn test_name_conflict_passes_other_errors() {
        let err = name_conflict(AppError::NotFound("Category".into()));
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
