//! Consumer adapters.
//!
//! Each consumer is an `EventHandler` with a `subscribe` helper that
//! registers it for the event types it understands. Effects leave through
//! ports (`QueryCache`, `ToastSink`) or are kept as local state.
//!
//! - `CacheInvalidator` - Marks cached queries stale
//! - `BlogToastNotifier` - Announces new blogs
//! - `NotificationFeed` - Notification list with unread tracking
//! - `ChatSession` - One open chat kept in sync
//! - `TypingIndicator` - Self-expiring "is typing" flag
//! - `ConnectionStatusIndicator` - Live/Offline badge and last event
//! - `ActivityLogger` - Logs every event

mod activity_log;
mod cache_invalidator;
mod chat_session;
mod connection_status;
mod notification_feed;
mod toast_notifier;
mod typing_indicator;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity_log::ActivityLogger;
pub use cache_invalidator::{CacheInvalidator, CACHE_EVENT_TYPES};
pub use chat_session::{ChatSession, MESSAGE_TOAST_DURATION};
pub use connection_status::ConnectionStatusIndicator;
pub use notification_feed::{NotificationFeed, NOTIFICATION_TOAST_DURATION};
pub use toast_notifier::{BlogToastNotifier, NEW_BLOG_TITLE, NEW_BLOG_TOAST_DURATION};
pub use typing_indicator::{TypingIndicator, DEFAULT_TYPING_TIMEOUT};
