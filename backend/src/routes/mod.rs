//! Route definitions for the crop advisor

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{config::StaticConfig, handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict_yield))
        .route("/insights", post(handlers::field_insights))
}

/// Front-end entry document and its assets
pub fn static_routes(config: &StaticConfig) -> Router<AppState> {
    let root = Path::new(&config.root);

    Router::new()
        .route_service("/", ServeFile::new(root.join("index.html")))
        .nest_service("/assets", ServeDir::new(root.join("assets")))
}
