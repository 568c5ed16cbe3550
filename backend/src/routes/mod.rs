//! Route definitions for the Homelab Dashboard API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Service catalog
        .nest("/services", service_routes())
        .nest("/categories", category_routes())
        .nest("/quick-links", quick_link_routes())
        // RSS
        .nest("/rss-feeds", rss_feed_routes())
        .route("/rss/combined", get(handlers::get_combined_items))
        .route("/rss/feeds/:id/items", get(handlers::get_feed_items))
        // Widgets
        .route("/bitcoin", get(handlers::get_bitcoin))
        .route("/system-health", get(handlers::get_system_health))
        .nest("/settings", settings_routes())
}

/// Service catalog routes
fn service_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_services).post(handlers::create_service),
        )
        .route("/hidden", get(handlers::list_hidden_services))
        .route("/check", post(handlers::check_all_services))
        .route(
            "/:id",
            get(handlers::get_service)
                .put(handlers::update_service)
                .delete(handlers::delete_service),
        )
        .route("/:id/check", post(handlers::check_service_status))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
}

fn quick_link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_quick_links).post(handlers::create_quick_link),
        )
        .route(
            "/:id",
            get(handlers::get_quick_link)
                .put(handlers::update_quick_link)
                .delete(handlers::delete_quick_link),
        )
}

fn rss_feed_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_rss_feeds).post(handlers::create_rss_feed),
        )
        .route(
            "/:id",
            get(handlers::get_rss_feed)
                .put(handlers::update_rss_feed)
                .delete(handlers::delete_rss_feed),
        )
}

/// Dashboard settings routes
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/glances",
            get(handlers::get_glances_settings).post(handlers::save_glances_settings),
        )
        .route("/glances/test", post(handlers::test_glances_connection))
}
