//! Delivery outcome classification tests against a fake Bot API.

use std::time::Duration;

use intake_notify::{Notifier, NotifierConfig, NotifyError, ParseMode};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn config(api_base: String) -> NotifierConfig {
    NotifierConfig {
        bot_token: Some("itest-token".to_string()),
        chat_id: Some("-1001".to_string()),
        api_base,
        ..NotifierConfig::default()
    }
}

#[tokio::test]
async fn request_carries_chat_id_text_and_parse_mode() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/botitest-token/sendMessage"))
        .and(body_partial_json(serde_json::json!({
            "chat_id": "-1001",
            "text": "🛒 *YANGI BUYURTMA*",
            "parse_mode": "Markdown",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(config(server.uri())).expect("build notifier");
    notifier.send("🛒 *YANGI BUYURTMA*", ParseMode::Markdown).await.expect("delivered");
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Nothing listens on port 9 (discard) on loopback.
    let notifier =
        Notifier::new(config("http://127.0.0.1:9".to_string())).expect("build notifier");

    let error = notifier.send("salom", ParseMode::Html).await.expect_err("network failure");

    assert!(matches!(error, NotifyError::Network { .. }));
    assert!(!error.is_configuration());
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut cfg = config(server.uri());
    cfg.timeout = Duration::from_millis(200);

    let notifier = Notifier::new(cfg).expect("build notifier");
    let error = notifier.send("salom", ParseMode::Html).await.expect_err("timeout");

    assert!(matches!(error, NotifyError::Timeout { .. }));
}

#[tokio::test]
async fn single_attempt_no_retry_on_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "ok": false,
            "description": "Internal Server Error"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(config(server.uri())).expect("build notifier");
    let error = notifier.send("salom", ParseMode::Html).await.expect_err("rejected");

    assert!(matches!(error, NotifyError::Rejected { .. }));
    // expect(1) on the mock verifies exactly one outbound attempt was made.
}
