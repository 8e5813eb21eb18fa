//! Closed taxonomy of events carried by the realtime stream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every event type the backend may push.
///
/// The set is closed: frames naming any other type are dropped at decode
/// time and never reach the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "blog:created")]
    BlogCreated,
    #[serde(rename = "blog:updated")]
    BlogUpdated,
    #[serde(rename = "blog:deleted")]
    BlogDeleted,
    #[serde(rename = "like:added")]
    LikeAdded,
    #[serde(rename = "comment:added")]
    CommentAdded,
    #[serde(rename = "follow:added")]
    FollowAdded,
    #[serde(rename = "notification:new")]
    NotificationNew,
    #[serde(rename = "message:sent")]
    MessageSent,
    #[serde(rename = "message:read")]
    MessageRead,
    #[serde(rename = "typing:start")]
    TypingStart,
    #[serde(rename = "typing:stop")]
    TypingStop,
}

impl EventType {
    /// All event types, in wire-declaration order.
    pub const ALL: &'static [EventType] = &[
        EventType::BlogCreated,
        EventType::BlogUpdated,
        EventType::BlogDeleted,
        EventType::LikeAdded,
        EventType::CommentAdded,
        EventType::FollowAdded,
        EventType::NotificationNew,
        EventType::MessageSent,
        EventType::MessageRead,
        EventType::TypingStart,
        EventType::TypingStop,
    ];

    /// Event types that change blog feeds, details or counters.
    pub const BLOG_ACTIVITY: &'static [EventType] = &[
        EventType::BlogCreated,
        EventType::BlogUpdated,
        EventType::BlogDeleted,
        EventType::LikeAdded,
        EventType::CommentAdded,
    ];

    /// Event types that concern a chat conversation.
    pub const CHAT: &'static [EventType] = &[
        EventType::MessageSent,
        EventType::MessageRead,
        EventType::TypingStart,
        EventType::TypingStop,
    ];

    /// Returns the wire literal (e.g. `"message:sent"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::BlogCreated => "blog:created",
            EventType::BlogUpdated => "blog:updated",
            EventType::BlogDeleted => "blog:deleted",
            EventType::LikeAdded => "like:added",
            EventType::CommentAdded => "comment:added",
            EventType::FollowAdded => "follow:added",
            EventType::NotificationNew => "notification:new",
            EventType::MessageSent => "message:sent",
            EventType::MessageRead => "message:read",
            EventType::TypingStart => "typing:start",
            EventType::TypingStop => "typing:stop",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type literal outside the closed taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}
