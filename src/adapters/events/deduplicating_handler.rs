//! DeduplicatingHandler - Wrapper that drops repeated deliveries.
//!
//! The stream carries no event id, and the server may replay or duplicate
//! events around a reconnect. This adapter wraps any `EventHandler` and
//! remembers a bounded window of recently seen keys.
//!
//! ## Usage
//!
//! ```ignore
//! let handler = DeduplicatingHandler::new(ChatSession::new(chat, toasts), 256)
//!     .with_key(|event| {
//!         event.payload_as::<MessageSent>().ok().map(|m| m.message_id.to_string())
//!     });
//!
//! bus.on(EventType::MessageSent, Arc::new(handler));
//! ```
//!
//! ## Error Handling
//!
//! - If the inner handler fails, the key is NOT remembered
//! - A later redelivery of the same event is passed through again

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};

use crate::domain::foundation::DomainError;
use crate::domain::realtime::RealtimeEvent;
use crate::ports::EventHandler;

type KeyFn = dyn Fn(&RealtimeEvent) -> Option<String> + Send + Sync;

/// Bounded record of recently seen keys, oldest evicted first.
struct RecentKeys {
    order: VecDeque<String>,
    seen: HashSet<String>,
    capacity: usize,
}

impl RecentKeys {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    fn insert(&mut self, key: String) {
        if self.capacity == 0 || !self.seen.insert(key.clone()) {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.seen.remove(&evicted);
            }
        }
    }
}

/// Wrapper that delivers each distinct event at most once per window.
pub struct DeduplicatingHandler<H: EventHandler> {
    inner: H,
    key: Box<KeyFn>,
    recent: Mutex<RecentKeys>,
}

impl<H: EventHandler> DeduplicatingHandler<H> {
    /// Wraps `inner`, remembering up to `capacity` keys.
    ///
    /// The default key is the event type and payload, plus the timestamp
    /// when the producer supplied one.
    pub fn new(inner: H, capacity: usize) -> Self {
        Self {
            inner,
            key: Box::new(default_key),
            recent: Mutex::new(RecentKeys::new(capacity)),
        }
    }

    /// Replaces the key function. Events for which it returns `None` are
    /// never deduplicated.
    pub fn with_key<F>(mut self, key: F) -> Self
    where
        F: Fn(&RealtimeEvent) -> Option<String> + Send + Sync + 'static,
    {
        self.key = Box::new(key);
        self
    }

    fn recent(&self) -> std::sync::MutexGuard<'_, RecentKeys> {
        self.recent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn default_key(event: &RealtimeEvent) -> Option<String> {
    if event.has_origin_timestamp() {
        Some(format!("{}|{}|{}", event.event_type, event.data, event.timestamp))
    } else {
        // Receive time differs per copy; keying on it would never match
        Some(format!("{}|{}", event.event_type, event.data))
    }
}

impl<H: EventHandler> EventHandler for DeduplicatingHandler<H> {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        let Some(key) = (self.key)(event) else {
            return self.inner.handle(event);
        };

        if self.recent().contains(&key) {
            tracing::debug!(
                handler = self.inner.name(),
                event_type = %event.event_type,
                "Skipping duplicate event"
            );
            return Ok(());
        }

        self.inner.handle(event)?;
        self.recent().insert(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
