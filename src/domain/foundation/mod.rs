//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the realtime domain.

mod ids;
mod timestamp;
mod errors;

pub use ids::{BlogId, ChatId, MessageId, NotificationId, SubscriptionId, UserId};
pub use timestamp::Timestamp;
pub use errors::{DomainError, ErrorCode, ValidationError};
