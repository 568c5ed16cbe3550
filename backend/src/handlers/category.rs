//! Category HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{CategoryUpdate, NewCategory};

use crate::services::CategoryService;
use crate::AppState;

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.list().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.get(id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a category; duplicate names are rejected with 409
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<NewCategory>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.create(input).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CategoryUpdate>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
