//! Realtime stream configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::realtime::ReconnectPolicy;

/// Upper bound on automatic reconnect attempts
pub const MAX_RECONNECT_ATTEMPTS_LIMIT: u32 = 20;

/// Upper bound on the first backoff delay
pub const MAX_RECONNECT_BASE_DELAY_MS: u64 = 60_000;

/// Realtime stream configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// SSE endpoint
    #[serde(default = "default_stream_url")]
    pub stream_url: String,

    /// Automatic reconnect attempts before giving up
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,

    /// Delay before the first reconnect, doubled on each further attempt
    #[serde(default = "default_reconnect_base_delay_ms")]
    pub reconnect_base_delay_ms: u64,

    /// Session cookie sent with the stream request (`name=value`)
    #[serde(default)]
    pub session_cookie: Option<SecretString>,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl RealtimeConfig {
    /// Backoff policy for the connection manager
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy::new(
            self.max_reconnect_attempts,
            Duration::from_millis(self.reconnect_base_delay_ms),
        )
    }

    /// Connect timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.stream_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("realtime.stream_url"));
        }
        let has_host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .map(|rest| !rest.is_empty() && !rest.starts_with('/'))
            .unwrap_or(false);
        if !has_host {
            return Err(ValidationError::InvalidStreamUrl(self.stream_url.clone()));
        }
        if !(1..=MAX_RECONNECT_ATTEMPTS_LIMIT).contains(&self.max_reconnect_attempts) {
            return Err(ValidationError::InvalidReconnectAttempts {
                max: MAX_RECONNECT_ATTEMPTS_LIMIT,
            });
        }
        if self.reconnect_base_delay_ms == 0
            || self.reconnect_base_delay_ms > MAX_RECONNECT_BASE_DELAY_MS
        {
            return Err(ValidationError::InvalidReconnectDelay {
                max_ms: MAX_RECONNECT_BASE_DELAY_MS,
            });
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            stream_url: default_stream_url(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
            reconnect_base_delay_ms: default_reconnect_base_delay_ms(),
            session_cookie: None,
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_stream_url() -> String {
    "http://localhost:5000/api/events/stream".to_string()
}

fn default_max_reconnect_attempts() -> u32 {
    5
}

fn default_reconnect_base_delay_ms() -> u64 {
    3000
}

fn default_connect_timeout() -> u64 {
    10
}
