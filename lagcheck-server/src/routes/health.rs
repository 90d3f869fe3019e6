//! Health check endpoints.
//!
//! `/__health` always answers 200 with the full report in the body,
//! whether the checks passed or not; only a Burrow that cannot be
//! listed at all turns into a 503. `/__gtg` is the binary variant for
//! load balancers: 200 or 503, minimal body.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

use crate::burrow::BurrowClient;
use crate::healthcheck::Healthcheck;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub healthcheck: Arc<Healthcheck<BurrowClient>>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /__health - Full per-group health report
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.healthcheck.check_all().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Couldn't produce health report: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /__gtg - Good-to-go readiness probe
pub async fn gtg(State(state): State<AppState>) -> impl IntoResponse {
    if state.healthcheck.good_to_go().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "")
    }
}
