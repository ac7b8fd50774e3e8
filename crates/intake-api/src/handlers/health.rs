//! Liveness probe.
//!
//! The service has no external dependencies worth probing (delivery
//! failures are per-request concerns), so a single liveness endpoint
//! suffices.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, instrument};

use crate::server::AppState;

/// Handles `GET /health`.
#[instrument(name = "liveness_check", skip(state))]
pub async fn liveness_check(State(state): State<AppState>) -> Response {
    debug!("Performing liveness check");

    let response = serde_json::json!({
        "status": "alive",
        "timestamp": state.clock.now_utc(),
        "service": "intake-api",
    });

    (StatusCode::OK, Json(response)).into_response()
}
