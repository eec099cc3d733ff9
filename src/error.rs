//! Error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown webhook: no registry entry named '{0}'")]
    UnknownWebhook(String),

    #[error("Webhook '{0}' has no url configured")]
    MissingUrl(String),

    #[error("Delivery to webhook '{webhook}' timed out after {secs} seconds")]
    Timeout { webhook: String, secs: f64 },

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
