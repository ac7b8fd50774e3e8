//! Configuration management for the intake service.
//!
//! Configuration is loaded in priority order: environment variables over
//! `config.toml` over built-in defaults. The service starts without
//! credentials; deliveries then fail with a configuration error rather than
//! the process crashing.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use intake_notify::NotifierConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// Inbound HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Notifier
    /// Telegram bot token. Absent means deliveries fail with a
    /// configuration error; the value is never logged unmasked.
    ///
    /// Environment variable: `BOT_TOKEN`
    #[serde(default, alias = "BOT_TOKEN", deserialize_with = "lenient_string")]
    pub bot_token: Option<String>,
    /// Destination chat identifier for notifications. Group and channel ids
    /// are negative integers; see [`lenient_string`].
    ///
    /// Environment variable: `BOT_DESTINATION_ID`
    #[serde(default, alias = "BOT_DESTINATION_ID", deserialize_with = "lenient_string")]
    pub bot_destination_id: Option<String>,
    /// Timeout for the outbound sendMessage call in seconds.
    ///
    /// Environment variable: `DELIVERY_TIMEOUT_SECONDS`
    #[serde(default = "default_delivery_timeout", alias = "DELIVERY_TIMEOUT_SECONDS")]
    pub delivery_timeout_seconds: u64,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Loads configuration from defaults, config file, and environment.
    ///
    /// # Errors
    ///
    /// Fails when a provided value cannot be parsed into its field type or
    /// when [`Config::validate`] rejects the result.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Converts to the notifier crate's configuration type.
    pub fn to_notifier_config(&self) -> NotifierConfig {
        NotifierConfig {
            bot_token: self.bot_token.clone(),
            chat_id: self.bot_destination_id.clone(),
            timeout: Duration::from_secs(self.delivery_timeout_seconds),
            ..NotifierConfig::default()
        }
    }

    /// Returns true if both notifier credentials are present and non-empty.
    pub fn notifier_configured(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        set(&self.bot_token) && set(&self.bot_destination_id)
    }

    /// Parses the server socket address from host and port.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Returns the bot token masked for logging.
    pub fn bot_token_masked(&self) -> &'static str {
        match self.bot_token.as_deref() {
            Some(s) if !s.is_empty() => "***",
            _ => "<unset>",
        }
    }

    /// Validates configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.delivery_timeout_seconds == 0 {
            anyhow::bail!("delivery_timeout_seconds must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            bot_token: None,
            bot_destination_id: None,
            delivery_timeout_seconds: default_delivery_timeout(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_delivery_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info,intake=debug,tower_http=debug".to_string()
}

/// Deserializes a credential that may arrive as a string or an integer.
///
/// The environment provider type-parses values, so a numeric chat id such as
/// `BOT_DESTINATION_ID=-1001234` reaches serde as a signed int. The wire
/// format wants a string either way.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Credential {
        Text(String),
        Integer(i64),
    }

    Ok(Option::<Credential>::deserialize(deserializer)?.map(|value| match value {
        Credential::Text(s) => s,
        Credential::Integer(n) => n.to_string(),
    }))
}
