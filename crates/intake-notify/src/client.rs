//! HTTP client for Telegram Bot API delivery.
//!
//! Builds the reqwest client once at startup and performs a single
//! `sendMessage` POST per submission, classifying the outcome into the
//! [`NotifyError`] taxonomy.

use std::{fmt, time::Duration};

use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    error::{NotifyError, Result},
    DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECONDS,
};

/// Markup dialect flag passed alongside the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Telegram HTML dialect; user content must be entity-escaped.
    Html,
    /// Telegram legacy Markdown dialect.
    Markdown,
}

impl ParseMode {
    /// Wire value for the `parse_mode` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Markdown => "Markdown",
        }
    }
}

/// Configuration for the notification client.
///
/// Credentials are optional on purpose: a deployment without them still
/// starts, and every delivery attempt reports a configuration failure
/// instead of crashing.
#[derive(Clone)]
pub struct NotifierConfig {
    /// Bot token used to authenticate against the Bot API.
    pub bot_token: Option<String>,
    /// Destination chat identifier.
    pub chat_id: Option<String>,
    /// API base URL; overridable so tests can point at a local fake.
    pub api_base: String,
    /// Timeout for the sendMessage call.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: "intake-notify/0.1".to_string(),
        }
    }
}

// The token is a credential; Debug output must never reveal it.
impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("bot_token", &self.bot_token.as_deref().map(|_| "***"))
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Response shape of the Bot API; only the fields this client inspects.
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram delivery client.
///
/// One instance is shared across all requests; reqwest pools connections
/// internally.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl Notifier {
    /// Creates a notifier with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Configuration` if the HTTP client cannot be
    /// built with the provided settings.
    pub fn new(config: NotifierConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                NotifyError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Returns true if both credentials are present.
    pub fn is_configured(&self) -> bool {
        credential(&self.config.bot_token).is_some() && credential(&self.config.chat_id).is_some()
    }

    /// Delivers a formatted message to the configured chat.
    ///
    /// Exactly one attempt is made; there is no retry. The submission data
    /// behind `text` is not retained anywhere after this call resolves.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the token or chat id is absent (no network call
    ///   is made in that case)
    /// - `Network` / `Timeout` for transport failures
    /// - `InvalidResponse` if the API answers with something that is not its
    ///   JSON shape
    /// - `Rejected` if the API answers with `ok: false` or a non-success
    ///   HTTP status
    pub async fn send(&self, text: &str, parse_mode: ParseMode) -> Result<()> {
        let Some(token) = credential(&self.config.bot_token) else {
            return Err(NotifyError::configuration("bot token is not configured"));
        };
        let Some(chat_id) = credential(&self.config.chat_id) else {
            return Err(NotifyError::configuration("destination chat id is not configured"));
        };

        // The URL embeds the token; it must stay out of logs and errors.
        let url = format!("{}/bot{}/sendMessage", self.config.api_base, token);

        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": parse_mode.as_str(),
        });

        debug!(parse_mode = parse_mode.as_str(), text_len = text.len(), "Sending notification");

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    return Err(NotifyError::timeout(self.config.timeout.as_secs()));
                }
                let scrubbed = e.without_url();
                if scrubbed.is_connect() {
                    return Err(NotifyError::network(format!("connection failed: {scrubbed}")));
                }
                return Err(NotifyError::network(scrubbed.to_string()));
            },
        };

        let status = response.status();
        let payload: SendMessageResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                return Err(NotifyError::invalid_response(format!(
                    "HTTP {status}: {}",
                    e.without_url()
                )));
            },
        };

        // Both the HTTP status and the body flag must signal success.
        if status.is_success() && payload.ok {
            info!("Notification delivered");
            Ok(())
        } else {
            let description =
                payload.description.unwrap_or_else(|| format!("HTTP {status}, no description"));
            Err(NotifyError::rejected(description))
        }
    }
}

/// Treats empty strings the same as unset credentials.
fn credential(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn test_config(api_base: String) -> NotifierConfig {
        NotifierConfig {
            bot_token: Some("test-token".to_string()),
            chat_id: Some("42".to_string()),
            api_base,
            ..NotifierConfig::default()
        }
    }

    #[tokio::test]
    async fn successful_delivery() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bottest-token/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": "42",
                "parse_mode": "HTML",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Notifier::new(test_config(server.uri())).expect("build notifier");
        notifier.send("salom", ParseMode::Html).await.expect("delivery succeeds");
    }

    #[tokio::test]
    async fn remote_rejection_reported_as_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let notifier = Notifier::new(test_config(server.uri())).expect("build notifier");
        let error = notifier.send("salom", ParseMode::Markdown).await.expect_err("rejected");

        assert!(matches!(error, NotifyError::Rejected { .. }));
        assert!(error.to_string().contains("chat not found"));
    }

    #[tokio::test]
    async fn non_json_response_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let notifier = Notifier::new(test_config(server.uri())).expect("build notifier");
        let error = notifier.send("salom", ParseMode::Html).await.expect_err("invalid response");

        assert!(matches!(error, NotifyError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn non_success_status_outranks_ok_flag() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"ok": true})),
            )
            .mount(&server)
            .await;

        let notifier = Notifier::new(test_config(server.uri())).expect("build notifier");
        let error = notifier.send("salom", ParseMode::Html).await.expect_err("rejected");

        assert!(matches!(error, NotifyError::Rejected { .. }));
        assert!(error.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn missing_token_fails_without_network_attempt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = test_config(server.uri());
        config.bot_token = None;

        let notifier = Notifier::new(config).expect("build notifier");
        let error = notifier.send("salom", ParseMode::Html).await.expect_err("config error");

        assert!(error.is_configuration());
    }

    #[tokio::test]
    async fn empty_chat_id_treated_as_unconfigured() {
        let mut config = test_config("http://127.0.0.1:9".to_string());
        config.chat_id = Some(String::new());

        let notifier = Notifier::new(config).expect("build notifier");
        let error = notifier.send("salom", ParseMode::Html).await.expect_err("config error");

        assert!(error.is_configuration());
        assert!(!notifier.is_configured());
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = test_config(DEFAULT_API_BASE.to_string());
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn parse_mode_wire_values() {
        assert_eq!(ParseMode::Html.as_str(), "HTML");
        assert_eq!(ParseMode::Markdown.as_str(), "Markdown");
    }
}
