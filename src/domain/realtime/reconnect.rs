//! Bounded exponential backoff for reconnecting the event stream.
//!
//! After a transport failure the connection is retried up to
//! `max_attempts` times, waiting `base_delay * 2^(attempt - 1)` before each
//! attempt. Once the bound is hit the connection stays down (fail-stop):
//! only an explicit `connect()` starts a new round.

use std::time::Duration;

/// Configuration for reconnect behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Number of automatic attempts before giving up.
    ///
    /// Default: 5 attempts
    pub max_attempts: u32,

    /// Delay before the first attempt; doubled for every following one.
    ///
    /// Default: 3 seconds
    pub base_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(3000),
        }
    }
}

impl ReconnectPolicy {
    /// Creates a policy with the given bound and base delay.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Backoff before the given 1-based attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

/// Mutable reconnect counter owned by the connection manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconnectState {
    attempts: u32,
}

impl ReconnectState {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts made since the last successful open.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Resets the counter (on successful open or explicit connect).
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Whether the policy forbids further automatic attempts.
    pub fn is_exhausted(&self, policy: &ReconnectPolicy) -> bool {
        self.attempts >= policy.max_attempts
    }

    /// Claims the next attempt and returns how long to wait before it.
    ///
    /// Returns `None` once the bound is reached; the counter is left as is.
    pub fn next_delay(&mut self, policy: &ReconnectPolicy) -> Option<Duration> {
        if self.is_exhausted(policy) {
            return None;
        }
        self.attempts += 1;
        Some(policy.delay_for_attempt(self.attempts))
    }
}
