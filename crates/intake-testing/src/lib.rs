//! Test infrastructure for the intake service.
//!
//! Provides a [`TestEnv`] that wires the real router against a wiremock
//! fake of the Telegram Bot API, with a pinned clock for deterministic
//! timestamps and helpers for issuing in-process requests. Used by the
//! integration tests of the API crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use intake_api::server::{create_router, AppState};
use intake_core::time::FixedClock;
use intake_notify::{Notifier, NotifierConfig};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Bot token used by every test environment.
pub const TEST_BOT_TOKEN: &str = "test-token";

/// Destination chat id used by every test environment.
pub const TEST_CHAT_ID: &str = "-1009999";

/// Path the fake Bot API expects sendMessage calls on.
pub const SEND_MESSAGE_PATH: &str = "/bottest-token/sendMessage";

/// Test environment: real router, fake Telegram, pinned clock.
pub struct TestEnv {
    telegram: MockServer,
    router: Router,
    clock: Arc<FixedClock>,
}

impl TestEnv {
    /// Creates an environment with credentials configured.
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Creates an environment with no credentials, for exercising the
    /// configuration-failure path.
    pub async fn without_credentials() -> Self {
        Self::build(false).await
    }

    async fn build(configured: bool) -> Self {
        let telegram = MockServer::start().await;

        let notifier_config = NotifierConfig {
            bot_token: configured.then(|| TEST_BOT_TOKEN.to_string()),
            chat_id: configured.then(|| TEST_CHAT_ID.to_string()),
            api_base: telegram.uri(),
            timeout: Duration::from_secs(5),
            ..NotifierConfig::default()
        };
        let notifier = Notifier::new(notifier_config).expect("build notifier");

        // Pinned to a known instant; tests can move it via `clock()`.
        let pinned = Utc
            .with_ymd_and_hms(2026, 1, 15, 7, 0, 0)
            .single()
            .expect("valid pinned test time");
        let clock = Arc::new(FixedClock::at(pinned));

        let state = AppState { notifier: Arc::new(notifier), clock: clock.clone() };
        let router = create_router(state);

        Self { telegram, router, clock }
    }

    /// Returns the pinned clock for adjusting the environment's time.
    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    /// Returns the fake Bot API server for mounting custom mocks.
    pub fn telegram(&self) -> &MockServer {
        &self.telegram
    }

    /// Mounts a sendMessage mock answering `{ok:true}`.
    pub async fn mock_delivery_ok(&self) {
        Mock::given(method("POST"))
            .and(path(SEND_MESSAGE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 1}
            })))
            .mount(&self.telegram)
            .await;
    }

    /// Mounts a sendMessage mock answering `{ok:false}`.
    pub async fn mock_delivery_rejected(&self) {
        Mock::given(method("POST"))
            .and(path(SEND_MESSAGE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "description": "Bad Request: chat not found"
            })))
            .mount(&self.telegram)
            .await;
    }

    /// Mounts a catch-all mock that fails the test if any outbound request
    /// is made before the environment is dropped.
    pub async fn expect_no_delivery(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.telegram)
            .await;
    }

    /// Issues an in-process JSON POST and returns status plus parsed body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let payload = serde_json::to_vec(body).context("serialize request body")?;
        self.post_raw(uri, payload).await
    }

    /// Issues an in-process POST with a raw body, for malformed-input tests.
    pub async fn post_raw(
        &self,
        uri: &str,
        body: impl Into<Vec<u8>>,
    ) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .context("build request")?;

        let response =
            self.router.clone().oneshot(request).await.context("execute request")?;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;
        let body: Value = serde_json::from_slice(&bytes).context("parse response json")?;

        Ok((status, body))
    }

    /// Issues an in-process GET and returns the raw response.
    pub async fn get(&self, uri: &str) -> Result<axum::response::Response> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .context("build request")?;

        self.router.clone().oneshot(request).await.context("execute request")
    }

    /// Returns the JSON bodies of every outbound sendMessage call so far.
    pub async fn outbound_messages(&self) -> Vec<Value> {
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }
}
