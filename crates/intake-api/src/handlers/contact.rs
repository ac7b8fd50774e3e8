//! Contact-form intake handler.
//!
//! Orchestrates the pipeline for one submission: parse the raw body,
//! validate against the full constraint schema, render the HTML-dialect
//! notification, deliver it, and map the outcome to an HTTP response.
//! Validation failures carry the full violation list; everything else is a
//! generic message with detail confined to server logs.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use intake_core::{format::format_contact, validate_contact};
use intake_notify::ParseMode;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};

use crate::server::AppState;

/// Handles `POST /api/contact`.
///
/// Response contract:
/// - `200 {success, message}` on delivery
/// - `400 {error, details}` on validation failure
/// - `500 {success:false, error}` on configuration or delivery failure
/// - `500 {error}` on a malformed body
#[instrument(name = "contact_submission", skip(state, body))]
pub async fn submit_contact(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Malformed contact request body");
            return malformed_body_response();
        },
    };

    let submission = match validate_contact(&payload) {
        Ok(submission) => submission,
        Err(e) => {
            debug!(violations = e.violations().len(), "Contact validation failed");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Noto'g'ri ma'lumotlar",
                    "details": e.violations(),
                })),
            )
                .into_response();
        },
    };

    let text = format_contact(&submission);

    match state.notifier.send(&text, ParseMode::Html).await {
        Ok(()) => {
            info!("Contact submission delivered");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Xabar yuborildi",
                })),
            )
                .into_response()
        },
        Err(e) => {
            // Configuration and delivery failures share the client-facing
            // copy; only the logs distinguish them.
            if e.is_configuration() {
                error!(error = %e, "Notifier not configured, contact submission dropped");
            } else {
                error!(error = %e, "Contact delivery failed");
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Xabar yuborishda xatolik. Telegram orqali yozing.",
                })),
            )
                .into_response()
        },
    }
}

/// Generic 500 for bodies that are not JSON at all.
fn malformed_body_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "Server xatosi"}))).into_response()
}
