//! debrief-api - Debrief normalization and enrichment microservice
//!
//! Accepts debrief records over HTTP, enriches them with predicted labels
//! and lesson clusters from the classification service, normalizes them,
//! and forwards them to the GraphQL persistence backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use debrief_api::cli::Args;
use debrief_api::services::{build_http_client, GraphQlGateway, HttpLabelClient, RecordAssembler};
use debrief_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "debrief_api=info,debrief_common=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting debrief-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = args
        .resolve_config()
        .context("Failed to resolve configuration")?;

    info!("Classification service: {}", config.classifier_url);
    info!("Persistence gateway: {}", config.gateway_url);
    info!("Section names: {}", config.section_names.join(", "));
    info!("Update descendant ids: {:?}", config.update_descendant_ids);

    let http_client = build_http_client(&config)?;
    let classifier = Arc::new(HttpLabelClient::new(&config.classifier_url, http_client.clone()));
    let gateway = Arc::new(GraphQlGateway::new(&config.gateway_url, http_client));
    let assembler = RecordAssembler::from_config(classifier, gateway, &config);

    let bind_addr = config.bind_addr.clone();
    let app = build_router(AppState::new(assembler, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
