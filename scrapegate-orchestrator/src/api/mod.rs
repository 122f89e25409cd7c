//! API Module
//!
//! HTTP API layer for the orchestrator.
//! Each submodule handles one endpoint; `response` shapes what callers see.

pub mod error;
pub mod health;
pub mod response;
pub mod scrape;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::service::ScrapeService;

/// Create the main API router with all endpoints
pub fn create_router(service: Arc<ScrapeService>, config: &Config) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Scrape endpoint
        .route("/api/scrape", post(scrape::scrape))
        // Add state and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http());

    match cors_layer(config.allowed_origin.as_deref()) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Single origin, POST only, `Content-Type` only
fn cors_layer(origin: Option<&str>) -> Option<CorsLayer> {
    let origin = origin?;

    let origin = match HeaderValue::from_str(origin) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin: {:?}", origin);
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
