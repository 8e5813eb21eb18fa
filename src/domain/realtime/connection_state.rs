//! Lifecycle state of the server-push connection.
//!
//! ## Transitions
//!
//! ```text
//! Disconnected --[connect]--> Connecting
//! Connecting --[stream opened]--> Connected
//! Connecting --[open failed]--> Disconnected
//! Connected --[stream error / closed]--> Disconnected
//! Disconnected --[backoff elapsed, attempts remain]--> Connecting
//! ```
//!
//! Exhaustion is not a separate state: the connection simply stays
//! `Disconnected` until `connect()` is called again.

use serde::Serialize;
use std::fmt;

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No connection handle exists.
    #[default]
    Disconnected,

    /// A handle exists and the stream is being opened.
    Connecting,

    /// The stream is open and frames are being delivered.
    Connected,
}

impl ConnectionState {
    /// Whether events can currently arrive.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Short label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "Live",
            ConnectionState::Connecting | ConnectionState::Disconnected => "Offline",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        };
        f.write_str(s)
    }
}
