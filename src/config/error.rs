//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid stream URL: {0}")]
    InvalidStreamUrl(String),

    #[error("Max reconnect attempts must be between 1 and {max}")]
    InvalidReconnectAttempts { max: u32 },

    #[error("Reconnect base delay must be between 1 and {max_ms} ms")]
    InvalidReconnectDelay { max_ms: u64 },

    #[error("Invalid connect timeout")]
    InvalidTimeout,

    #[error("Invalid typing timeout")]
    InvalidTypingTimeout,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
