//! Error types for notification delivery.
//!
//! Separates configuration failures (deployment problem, no network attempt
//! made) from delivery failures (the messaging API could not be reached or
//! did not accept the message). Callers map the two classes to different
//! diagnostics; neither carries credentials.

use thiserror::Error;

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Error conditions for a notification delivery attempt.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// Required credentials are absent; no network call was attempted.
    #[error("notifier configuration error: {message}")]
    Configuration {
        /// What is missing or invalid.
        message: String,
    },

    /// Network-level failure talking to the messaging API.
    #[error("network error: {message}")]
    Network {
        /// Transport failure description, scrubbed of the request URL.
        message: String,
    },

    /// The request exceeded the configured timeout.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Configured timeout in seconds.
        timeout_seconds: u64,
    },

    /// The messaging API answered with something other than its JSON shape.
    #[error("invalid response from messaging API: {message}")]
    InvalidResponse {
        /// Why the response could not be interpreted.
        message: String,
    },

    /// The messaging API answered but signalled rejection (`ok: false`).
    #[error("messaging API rejected the message: {description}")]
    Rejected {
        /// Remote rejection description, server-side diagnostics only.
        description: String,
    },
}

impl NotifyError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse { message: message.into() }
    }

    /// Creates a remote-rejection error.
    pub fn rejected(description: impl Into<String>) -> Self {
        Self::Rejected { description: description.into() }
    }

    /// Returns true for deployment-level configuration failures.
    ///
    /// These are never caused by the submitter and mean no delivery was
    /// attempted; callers log them distinctly from delivery failures.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
