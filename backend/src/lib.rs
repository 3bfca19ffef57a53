//! Price Tracker backend
//!
//! Tracks the prices vendors charge for catalog SKUs at each location,
//! with single-record upserts, spreadsheet bulk import and a read-only
//! external price API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod import;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
}

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_bytes = state.config.import.max_upload_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes(max_upload_bytes))
        .nest("/api/external/v1", routes::external_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Price Tracker API v1"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
