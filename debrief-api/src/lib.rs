//! debrief-api library interface
//!
//! Exposes the router, state and services for integration testing.

pub mod api;
pub mod cli;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{HeaderValue, Method};
use axum::Router;
use chrono::{DateTime, Utc};
use debrief_common::config::ServiceConfig;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::services::RecordAssembler;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-operation pipeline
    pub assembler: Arc<RecordAssembler>,
    /// Resolved configuration (immutable after startup)
    pub config: Arc<ServiceConfig>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(assembler: RecordAssembler, config: ServiceConfig) -> Self {
        Self {
            assembler: Arc::new(assembler),
            config: Arc::new(config),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);

    Router::new()
        .merge(api::debrief_routes())
        .merge(api::task_routes())
        .merge(api::health_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(tower_http::cors::Any);

    match origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
            layer
        }
    }
}
