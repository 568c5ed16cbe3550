//! Homelab Dashboard - Backend Server
//!
//! REST API behind the homelab dashboard: the service catalog with
//! reachability checks, quick links, RSS aggregation, the Bitcoin price
//! widget and host health metrics.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{CoinGeckoClient, HttpProber, RssClient};
use services::{BitcoinService, CatalogService, StatusCheckService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub bitcoin: BitcoinService,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        let bitcoin = BitcoinService::new(
            CoinGeckoClient::new(http.clone(), &config.coingecko),
            Duration::from_secs(config.coingecko.cache_ttl_secs),
        );

        Ok(Self {
            db,
            config: Arc::new(config),
            http,
            bitcoin,
        })
    }

    pub fn rss_client(&self) -> RssClient {
        RssClient::new(self.http.clone(), &self.config.rss)
    }

    pub fn status_checker(&self) -> StatusCheckService {
        let prober = HttpProber::new(
            self.http.clone(),
            Duration::from_secs(self.config.status_check.timeout_secs),
        );
        StatusCheckService::new(CatalogService::new(self.db.clone()), prober)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homelab_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Homelab Dashboard Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    let addr = config.bind_address();
    let check_interval = config.status_check.interval_secs;

    // Create application state
    let state = AppState::new(db_pool, config)?;

    if check_interval > 0 {
        tracing::info!("Checking service status every {}s", check_interval);
        state
            .status_checker()
            .spawn_periodic(Duration::from_secs(check_interval));
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
