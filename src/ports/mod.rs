//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the realtime core and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventSubscriber` - Port for subscribing to realtime events
//! - `EventHandler` - Handler that processes delivered events
//! - `Subscription` - Cancellation handle returned by every subscribe call
//!
//! ## Transport Ports
//!
//! - `EventStreamSource` - Opens the server-push stream
//! - `ConnectionMonitor` - Read-only view of connection status
//!
//! ## Consumer Effect Ports
//!
//! - `QueryCache` - Invalidation of the client data cache
//! - `ToastSink` - Transient user-facing notices

mod connection_monitor;
mod event_stream_source;
mod event_subscriber;
mod query_cache;
mod toast_sink;

pub use connection_monitor::ConnectionMonitor;
pub use event_stream_source::{EventStreamSource, FrameStream, TransportError};
pub use event_subscriber::{
    EventHandler, EventSubscriber, FnHandler, Subscription, SubscriptionRegistry,
};
pub use query_cache::{QueryCache, QueryKey};
pub use toast_sink::{Toast, ToastSink};
