//! Service-order intake handler.
//!
//! Same pipeline as the contact handler with the coarser presence-only
//! validation, the Markdown-dialect notification, and a server-generated
//! timestamp. Configuration failures get their own client-facing message
//! here; the violation list is logged but the client receives a single
//! generic 400.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use intake_core::{format::format_service_order, validate_service_order};
use intake_notify::ParseMode;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};

use crate::server::AppState;

/// Handles `POST /api/service-order`.
///
/// Response contract:
/// - `200 {success:true}` on delivery
/// - `400 {success:false, error}` when any required field is missing
/// - `500 {success:false, error}` on configuration or delivery failure,
///   with distinct copy for the configuration case
#[instrument(name = "service_order_submission", skip(state, body))]
pub async fn submit_service_order(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Malformed service-order request body");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": "Server xatosi"})),
            )
                .into_response();
        },
    };

    let submission = match validate_service_order(&payload) {
        Ok(submission) => submission,
        Err(e) => {
            debug!(violations = e.violations().len(), "Service order missing required fields");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "Barcha maydonlar to'ldirilishi kerak",
                })),
            )
                .into_response();
        },
    };

    let text = format_service_order(&submission, state.clock.now_utc());

    match state.notifier.send(&text, ParseMode::Markdown).await {
        Ok(()) => {
            info!(service = %submission.service, "Service order delivered");
            (StatusCode::OK, Json(json!({"success": true}))).into_response()
        },
        Err(e) if e.is_configuration() => {
            error!(error = %e, "Notifier not configured, service order dropped");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Server konfiguratsiyasi xatosi",
                })),
            )
                .into_response()
        },
        Err(e) => {
            error!(error = %e, "Service order delivery failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Xabar yuborishda xatolik",
                })),
            )
                .into_response()
        },
    }
}
