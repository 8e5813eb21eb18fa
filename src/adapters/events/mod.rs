//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process typed pub/sub
//! - `DeduplicatingHandler` - Wrapper that drops repeated deliveries

mod deduplicating_handler;
mod in_memory;

pub use deduplicating_handler::DeduplicatingHandler;
pub use in_memory::InMemoryEventBus;
