//! Realtime module - the event contract between backend stream and consumers.
//!
//! - `EventType` - closed taxonomy of pushed events
//! - `RealtimeEvent` - decoded envelope routed by the event bus
//! - `payloads` - typed views over event data
//! - `ConnectionState` / `ReconnectPolicy` - transport lifecycle vocabulary

mod connection_state;
mod event;
mod event_type;
pub mod payloads;
mod reconnect;

pub use connection_state::ConnectionState;
pub use event::{DecodeError, RealtimeEvent};
pub use event_type::{EventType, UnknownEventType};
pub use reconnect::{ReconnectPolicy, ReconnectState};
