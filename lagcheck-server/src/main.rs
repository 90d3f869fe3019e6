//! lagcheck - Aggregate healthcheck for Kafka consumer lag.
//!
//! Architecture:
//! - Axum HTTP server exposes `/__health` and `/__gtg`
//! - Each request fans out to Burrow: one consumer-list fetch, then one
//!   concurrent status fetch per discovered group
//! - lagcheck-core parses the payloads and applies whitelist/tolerance
//!   policy; verdicts are aggregated into the response body
//!
//! # Usage
//!
//! ```bash
//! BURROW_URL=http://burrow:8080 WHITELISTED_TOPICS=Concept LAG_TOLERANCE=30 \
//!     cargo run --bin lagcheck
//! ```

mod burrow;
mod config;
mod healthcheck;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::burrow::BurrowClient;
use crate::config::Config;
use crate::healthcheck::Healthcheck;
use crate::routes::{gtg, health, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .init();
    }

    info!("Starting lagcheck v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Build the Burrow client and the orchestrator
    let client = BurrowClient::new(
        config.burrow_url.clone(),
        config.burrow_cluster.clone(),
        config.request_timeout,
    )?;
    let healthcheck = Healthcheck::new(
        client,
        config.whitelisted_topics.clone(),
        config.lag_tolerance,
    );

    // Create app state
    let state = AppState {
        healthcheck: Arc::new(healthcheck),
    };

    // Build router
    let app = Router::new()
        .route("/__health", get(health))
        .route("/__gtg", get(gtg))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server; a bind failure is fatal
    let addr: SocketAddr = config.server_addr().parse()?;
    info!("Listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Can't set up HTTP listener on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

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
