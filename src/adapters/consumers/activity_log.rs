//! ActivityLogger - Writes every received event to the log.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::foundation::DomainError;
use crate::domain::realtime::{EventType, RealtimeEvent};
use crate::ports::{EventHandler, Subscription};

/// Logs each event at `info` with its type and timestamp.
#[derive(Default)]
pub struct ActivityLogger {
    seen: AtomicU64,
}

impl ActivityLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(self: Arc<Self>, bus: &InMemoryEventBus) -> Subscription {
        bus.on_all(EventType::ALL, self)
    }

    /// Events logged so far.
    pub fn seen(&self) -> u64 {
        self.seen.load(Ordering::Relaxed)
    }
}

impl EventHandler for ActivityLogger {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        let seen = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            event_type = %event.event_type,
            timestamp = %event.timestamp,
            seen,
            data = %event.data,
            "Realtime event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ActivityLogger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_every_type() {
        let bus = InMemoryEventBus::new();
        let logger = Arc::new(ActivityLogger::new());
        let _sub = Arc::clone(&logger).subscribe(&bus);

        for event_type in EventType::ALL {
            bus.emit(&RealtimeEvent::new(*event_type, json!({})));
        }

        assert_eq!(logger.seen(), EventType::ALL.len() as u64);
    }
}
