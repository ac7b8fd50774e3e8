//! Intake lead-relay service.
//!
//! Main entry point. Initializes tracing, loads configuration, builds the
//! Telegram notifier, and serves the intake API until shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use intake_api::{server::AppState, Config};
use intake_core::time::SystemClock;
use intake_notify::Notifier;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config.rust_log)?;

    info!("Starting intake lead-relay service");
    info!(
        host = %config.host,
        port = config.port,
        bot_token = %config.bot_token_masked(),
        "Configuration loaded"
    );

    if !config.notifier_configured() {
        warn!(
            "BOT_TOKEN or BOT_DESTINATION_ID is not set; submissions will be \
             rejected with a configuration error until both are provided"
        );
    }

    let notifier =
        Notifier::new(config.to_notifier_config()).context("Failed to build Telegram notifier")?;

    let state = AppState { notifier: Arc::new(notifier), clock: Arc::new(SystemClock) };

    let addr = config.parse_server_addr()?;
    info!(addr = %addr, "Intake is ready to receive submissions");

    intake_api::start_server(state, addr).await.context("HTTP server failed")?;

    info!("Intake shutdown complete");
    Ok(())
}

/// Initializes tracing with the configured filter; a `RUST_LOG` set in the
/// process environment takes precedence.
fn init_tracing(default_filter: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("Invalid log filter")?;

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    Ok(())
}
