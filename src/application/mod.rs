//! Application layer - Composition of the realtime core.
//!
//! The application constructs one `RealtimeService` at start-up and hands
//! it (or its bus and monitor) to the consumers that need it.

mod realtime_service;

pub use realtime_service::RealtimeService;
