//! System health and Glances settings handlers

use std::time::Duration;

use axum::{extract::State, Json};
use shared::{ConnectionTestResult, GlancesSettings, GlancesSettingsView, SystemHealth};

use crate::error::AppResult;
use crate::services::{SettingsService, SystemHealthService};
use crate::AppState;

fn health_service(state: &AppState) -> SystemHealthService {
    SystemHealthService::new(
        SettingsService::new(state.db.clone()),
        state.http.clone(),
        Duration::from_secs(state.config.glances.timeout_secs),
    )
}

/// Host metrics from Glances, or simulated values
pub async fn get_system_health(State(state): State<AppState>) -> AppResult<Json<SystemHealth>> {
    let health = health_service(&state).current().await?;
    Ok(Json(health))
}

/// Stored Glances settings without the password
pub async fn get_glances_settings(
    State(state): State<AppState>,
) -> AppResult<Json<GlancesSettingsView>> {
    let service = SettingsService::new(state.db.clone());
    let settings = service.glances().await?;
    Ok(Json(settings.to_view()))
}

pub async fn save_glances_settings(
    State(state): State<AppState>,
    Json(input): Json<GlancesSettings>,
) -> AppResult<Json<GlancesSettingsView>> {
    let service = SettingsService::new(state.db.clone());
    let saved = service.save_glances(input).await?;
    Ok(Json(saved.to_view()))
}

/// Try a Glances connection without saving the settings
pub async fn test_glances_connection(
    State(state): State<AppState>,
    Json(input): Json<GlancesSettings>,
) -> AppResult<Json<ConnectionTestResult>> {
    let result = health_service(&state).test_connection(input).await?;
    Ok(Json(result))
}
