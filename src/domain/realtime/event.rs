//! The realtime event envelope and its wire decoding.
//!
//! Each SSE `message` frame carries one JSON object:
//!
//! ```text
//! {"type": "message:sent", "data": {...}, "timestamp": "2024-01-15T10:30:00.000Z"}
//! ```
//!
//! Decoding is all-or-nothing. A frame that is not JSON, lacks a `type`,
//! names a type outside [`EventType`], or carries an unparseable timestamp
//! produces a [`DecodeError`] and is dropped by the transport.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::foundation::{DomainError, Timestamp};

use super::event_type::EventType;

/// Reasons an inbound frame cannot become a [`RealtimeEvent`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Frame is not a valid event envelope: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Invalid event timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// A typed, timestamped notification of a state change on the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeEvent {
    /// Routing key on the event bus.
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Type-specific payload. The bus never interprets it.
    pub data: JsonValue,

    /// When the backend produced the event (receive time if omitted).
    pub timestamp: Timestamp,

    /// False when `timestamp` is only the local receive time.
    #[serde(skip)]
    origin_timestamp: bool,
}

/// Envelope as it appears on the wire, before the type is checked.
#[derive(Debug, Deserialize)]
struct WireEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: JsonValue,
    #[serde(default)]
    timestamp: Option<String>,
}

impl RealtimeEvent {
    /// Creates an event stamped with the current time.
    pub fn new(event_type: EventType, data: JsonValue) -> Self {
        Self {
            event_type,
            data,
            timestamp: Timestamp::now(),
            origin_timestamp: false,
        }
    }

    /// Sets the event timestamp as given by its producer.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self.origin_timestamp = true;
        self
    }

    /// Whether the timestamp came from the producer rather than the clock
    /// at receipt.
    pub fn has_origin_timestamp(&self) -> bool {
        self.origin_timestamp
    }

    /// Decodes one frame body into an event.
    pub fn decode(frame: &str) -> Result<Self, DecodeError> {
        let wire: WireEnvelope = serde_json::from_str(frame)?;

        let event_type = wire
            .event_type
            .parse::<EventType>()
            .map_err(|e| DecodeError::UnknownEventType(e.0))?;

        let event = Self::new(event_type, wire.data);
        match wire.timestamp {
            Some(raw) => {
                let timestamp = Timestamp::parse_iso8601(&raw)
                    .map_err(|_| DecodeError::InvalidTimestamp(raw))?;
                Ok(event.with_timestamp(timestamp))
            }
            None => Ok(event),
        }
    }

    /// Deserializes the payload into a typed view.
    ///
    /// Mismatches are reported as [`DomainError`] with code `InvalidPayload`
    /// so handlers can propagate them with `?`.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| DomainError::invalid_payload(self.event_type.as_str(), e))
    }
}
