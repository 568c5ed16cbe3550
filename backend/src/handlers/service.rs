//! Service catalog HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{NewService, ServiceQuery, ServiceUpdate, StatusCheckResult};

use crate::services::CatalogService;
use crate::AppState;

/// List visible services, filtered by `?category=` or `?search=`
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.list(&query).await {
        Ok(services) => (StatusCode::OK, Json(services)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List services kept out of the main grid
pub async fn list_hidden_services(State(state): State<AppState>) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.list_hidden().await {
        Ok(services) => (StatusCode::OK, Json(services)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a single service
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.get(id).await {
        Ok(found) => (StatusCode::OK, Json(found)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new service
pub async fn create_service(
    State(state): State<AppState>,
    Json(input): Json<NewService>,
) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.create(input).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a service
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ServiceUpdate>,
) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a service
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Probe one service and store its status
pub async fn check_service_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let checker = state.status_checker();

    match checker.check_service(id).await {
        Ok(status) => (
            StatusCode::OK,
            Json(StatusCheckResult { id: None, status }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Probe every service
pub async fn check_all_services(State(state): State<AppState>) -> impl IntoResponse {
    let checker = state.status_checker();

    match checker.check_all().await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => e.into_response(),
    }
}
