//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BLOGSTREAM` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a local
//! development setup.
//!
//! # Example
//!
//! ```no_run
//! use blogstream::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Streaming from {}", config.realtime.stream_url);
//! ```

mod error;
mod features;
mod logging;
mod realtime;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::LoggingConfig;
pub use realtime::{RealtimeConfig, MAX_RECONNECT_ATTEMPTS_LIMIT, MAX_RECONNECT_BASE_DELAY_MS};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Stream endpoint, credentials and reconnect policy
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// Consumer feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BLOGSTREAM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BLOGSTREAM__REALTIME__STREAM_URL=...` -> `realtime.stream_url = ...`
    /// - `BLOGSTREAM__FEATURES__INVALIDATE_BLOGS=true` -> `features.invalidate_blogs = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BLOGSTREAM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.realtime.validate()?;
        self.features.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
