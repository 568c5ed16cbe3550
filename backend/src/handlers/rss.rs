//! RSS feed management and item aggregation handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{NewRssFeed, RssFeedQuery, RssFeedUpdate, RssItem};

use crate::error::AppResult;
use crate::services::RssFeedService;
use crate::AppState;

/// List configured feeds; `?active=true` keeps only active ones
pub async fn list_rss_feeds(
    State(state): State<AppState>,
    Query(query): Query<RssFeedQuery>,
) -> impl IntoResponse {
    let service = RssFeedService::new(state.db.clone());

    match service.list(query.active.unwrap_or(false)).await {
        Ok(feeds) => (StatusCode::OK, Json(feeds)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_rss_feed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = RssFeedService::new(state.db.clone());

    match service.get(id).await {
        Ok(feed) => (StatusCode::OK, Json(feed)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_rss_feed(
    State(state): State<AppState>,
    Json(input): Json<NewRssFeed>,
) -> impl IntoResponse {
    let service = RssFeedService::new(state.db.clone());

    match service.create(input).await {
        Ok(feed) => (StatusCode::CREATED, Json(feed)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_rss_feed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<RssFeedUpdate>,
) -> impl IntoResponse {
    let service = RssFeedService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(feed) => (StatusCode::OK, Json(feed)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_rss_feed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let service = RssFeedService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Latest items of a single feed
pub async fn get_feed_items(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RssItem>>> {
    let service = RssFeedService::new(state.db.clone());
    let items = service.feed_items(&state.rss_client(), id).await?;
    Ok(Json(items))
}

/// Items from every active feed, newest first
pub async fn get_combined_items(State(state): State<AppState>) -> AppResult<Json<Vec<RssItem>>> {
    let service = RssFeedService::new(state.db.clone());
    let items = service
        .combined_items(&state.rss_client(), state.config.rss.combined_limit)
        .await?;
    Ok(Json(items))
}
