//! Adapters - Implementations of port interfaces.
//!
//! - `events` - In-process event bus and handler decorators
//! - `sse` - Server-Sent Events transport and connection manager
//! - `consumers` - Subscribers that turn events into local effects

pub mod consumers;
pub mod events;
pub mod sse;

pub use consumers::{
    ActivityLogger, BlogToastNotifier, CacheInvalidator, ChatSession, ConnectionStatusIndicator,
    NotificationFeed, TypingIndicator,
};
pub use events::{DeduplicatingHandler, InMemoryEventBus};
pub use sse::{ConnectionManager, HttpEventStreamSource};
