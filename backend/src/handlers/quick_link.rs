//! Quick link HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{NewQuickLink, QuickLinkQuery, QuickLinkUpdate};

use crate::services::QuickLinkService;
use crate::AppState;

/// List quick links, optionally for one `?category=`
pub async fn list_quick_links(
    State(state): State<AppState>,
    Query(query): Query<QuickLinkQuery>,
) -> impl IntoResponse {
    let service = QuickLinkService::new(state.db.clone());

    match service.list(query.category.as_deref()).await {
        Ok(links) => (StatusCode::OK, Json(links)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_quick_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = QuickLinkService::new(state.db.clone());

    match service.get(id).await {
        Ok(link) => (StatusCode::OK, Json(link)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_quick_link(
    State(state): State<AppState>,
    Json(input): Json<NewQuickLink>,
) -> impl IntoResponse {
    let service = QuickLinkService::new(state.db.clone());

    match service.create(input).await {
        Ok(link) => (StatusCode::CREATED, Json(link)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_quick_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<QuickLinkUpdate>,
) -> impl IntoResponse {
    let service = QuickLinkService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(link) => (StatusCode::OK, Json(link)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_quick_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = QuickLinkService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
