//! Persisted dashboard settings

use shared::GlancesSettings;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::AppResult;

const GLANCES_KEY: &str = "glances";

/// Key/value settings stored in `app_settings`
#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

impl SettingsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Stored Glances settings, or disabled defaults when none were saved
    pub async fn glances(&self) -> AppResult<GlancesSettings> {
        let stored: Option<Json<GlancesSettings>> =
            sqlx::query_scalar("SELECT value FROM app_settings WHERE key = $1")
                .bind(GLANCES_KEY)
                .fetch_optional(&self.db)
                .await?;

        Ok(stored.map(|Json(settings)| settings).unwrap_or_default())
    }

    /// Validate and save Glances settings, keeping the stored password when
    /// the new settings leave it blank
    pub async fn save_glances(&self, incoming: GlancesSettings) -> AppResult<GlancesSettings> {
        let stored = self.glances().await?;
        let settings = incoming.merged_with(&stored)?;

        sqlx::query(
            r#"
            INSERT INTO app_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(GLANCES_KEY)
        .bind(Json(&settings))
        .execute(&self.db)
        .await?;

        tracing::info!(
            "Saved Glances settings (url: {}, enabled: {})",
            settings.url,
            settings.enabled
        );
        Ok(settings)
    }
}
