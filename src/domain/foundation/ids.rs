//! Strongly-typed identifier value objects.
//!
//! Backend identifiers (users, blogs, chats, messages) are opaque strings
//! minted by the server. Locally created records (notifications) use UUIDs.
//! Subscriptions are numbered by the event bus that owns them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares an opaque, server-minted string identifier.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, rejecting blank values.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(value))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Identifier of a user account.
    UserId,
    "user_id"
);

string_id!(
    /// Identifier of a blog post.
    BlogId,
    "blog_id"
);

string_id!(
    /// Identifier of a chat conversation.
    ChatId,
    "chat_id"
);

string_id!(
    /// Identifier of a single chat message.
    MessageId,
    "message_id"
);

/// Unique identifier for a locally received notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Creates a new random NotificationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of one registration on the event bus.
///
/// Unique per bus; two registrations of the same handler get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wraps a raw sequence number.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw sequence number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_reject_blank_values() {
        assert!(ChatId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert!(BlogId::new("65a1f0").is_ok());
    }

    #[test]
    fn string_ids_report_their_field_name() {
        let err = MessageId::new("").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("message_id"));
    }

    #[test]
    fn string_ids_deserialize_from_plain_strings() {
        let id: ChatId = serde_json::from_str("\"c1\"").unwrap();
        assert_eq!(id.as_str(), "c1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c1\"");
    }

    #[test]
    fn string_ids_reject_blank_values_when_deserializing() {
        assert!(serde_json::from_str::<ChatId>("\"\"").is_err());
        assert!(serde_json::from_str::<UserId>("\"   \"").is_err());
    }

    #[test]
    fn notification_ids_are_unique() {
        assert_ne!(NotificationId::new(), NotificationId::new());
    }

    #[test]
    fn notification_id_parses_from_string() {
        let id = NotificationId::new();
        let parsed: NotificationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn subscription_id_display() {
        assert_eq!(SubscriptionId::from_raw(7).to_string(), "sub-7");
    }
}
