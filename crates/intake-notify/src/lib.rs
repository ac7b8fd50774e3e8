//! Telegram notification delivery for the intake service.
//!
//! One formatted message in, one HTTPS POST to the Bot API out. There is no
//! retry, no queueing, and no persistence: a failed delivery is surfaced to
//! the caller immediately. Missing credentials are reported as a
//! configuration failure before any network attempt is made.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{Notifier, NotifierConfig, ParseMode};
pub use error::{NotifyError, Result};

/// Default Telegram Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default timeout for the sendMessage call in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
