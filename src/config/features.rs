//! Feature flags configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Feature flags for realtime consumers
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Invalidate cached blog queries on blog activity.
    /// Off by default so a busy feed does not refetch constantly.
    #[serde(default)]
    pub invalidate_blogs: bool,

    /// Seconds a typing indicator stays on without a refresh
    #[serde(default = "default_typing_timeout")]
    pub typing_timeout_secs: u64,
}

impl FeatureFlags {
    /// Typing timeout as a `Duration`
    pub fn typing_timeout(&self) -> Duration {
        Duration::from_secs(self.typing_timeout_secs)
    }

    /// Validate feature flags
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.typing_timeout_secs == 0 || self.typing_timeout_secs > 60 {
            return Err(ValidationError::InvalidTypingTimeout);
        }
        Ok(())
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            invalidate_blogs: false,
            typing_timeout_secs: default_typing_timeout(),
        }
    }
}

fn default_typing_timeout() -> u64 {
    5
}
