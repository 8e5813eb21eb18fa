//! Domain layer containing the realtime vocabulary and client-side models.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `realtime` - Event taxonomy, envelope decoding, connection lifecycle
//! - `chat` - Conversation state patched by pushed chat events
//! - `notification` - Notification feed entries

pub mod chat;
pub mod foundation;
pub mod notification;
pub mod realtime;
