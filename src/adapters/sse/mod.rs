//! Server-Sent Events transport.
//!
//! - `ConnectionManager` - Connection lifecycle and bounded reconnect
//! - `HttpEventStreamSource` - `reqwest` + `eventsource-stream` source

mod connection_manager;
mod http_source;

pub use connection_manager::ConnectionManager;
pub use http_source::HttpEventStreamSource;
