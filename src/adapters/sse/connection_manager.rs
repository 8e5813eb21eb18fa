//! ConnectionManager - Owns the single realtime stream connection.
//!
//! Opens the stream through an `EventStreamSource`, decodes each frame and
//! hands it to the event bus, and reconnects with bounded exponential
//! backoff when the stream fails.
//!
//! ## Lifecycle
//!
//! ```text
//! Disconnected -> Connecting -> Connected
//!       ^              |            |
//!       +---- error ---+------------+
//!       |
//!       +-> Connecting (after backoff, while attempts remain)
//! ```
//!
//! ## Tasks
//!
//! - One driver task per live connection. It reads frames and emits them
//!   synchronously, so one event is fully delivered before the next frame
//!   is read.
//! - At most one pending retry task, sleeping out the backoff delay.
//!
//! Both are aborted by `disconnect()`. Every driver carries the generation
//! it was started under; a failure reported by an older generation is
//! ignored. An abort only lands at the driver's next yield, so the driver
//! also checks its generation before each dispatch and stops once stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::realtime::{ConnectionState, RealtimeEvent, ReconnectPolicy, ReconnectState};
use crate::ports::{ConnectionMonitor, EventStreamSource, TransportError};

/// Manages the realtime connection and its reconnect policy.
///
/// Dropping the manager closes the connection.
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn EventStreamSource>,
    bus: Arc<InMemoryEventBus>,
    policy: ReconnectPolicy,
    shared: Mutex<Shared>,
    /// Bumped under the `shared` lock, read lock-free by drivers.
    generation: AtomicU64,
    state_tx: watch::Sender<ConnectionState>,
}

/// Mutable connection state. The lock is never held across an `.await`.
#[derive(Default)]
struct Shared {
    driver: Option<Driver>,
    pending_retry: Option<JoinHandle<()>>,
    reconnect: ReconnectState,
}

struct Driver {
    generation: u64,
    task: JoinHandle<()>,
}

impl ConnectionManager {
    /// Creates a disconnected manager feeding `bus`.
    pub fn new(
        source: Arc<dyn EventStreamSource>,
        bus: Arc<InMemoryEventBus>,
        policy: ReconnectPolicy,
    ) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            inner: Arc::new(Inner {
                source,
                bus,
                policy,
                shared: Mutex::new(Shared::default()),
                generation: AtomicU64::new(0),
                state_tx,
            }),
        }
    }

    /// Opens the connection unless one already exists.
    ///
    /// Resets the reconnect counter and cancels any pending backoff, so
    /// calling this after retries were exhausted starts over.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn connect(&self) {
        let mut shared = self.inner.lock();
        if let Some(driver) = &shared.driver {
            tracing::debug!(generation = driver.generation, "Realtime connection already active");
            return;
        }

        shared.reconnect.reset();
        if let Some(retry) = shared.pending_retry.take() {
            retry.abort();
        }
        Inner::start_driver(&self.inner, &mut shared);
    }

    /// Closes the connection if one exists. Subscriptions are untouched.
    pub fn disconnect(&self) {
        self.inner.shutdown();
    }

    /// Automatic retries made since the last successful open.
    pub fn reconnect_attempts(&self) -> u32 {
        self.inner.lock().reconnect.attempts()
    }

    /// Backoff policy in use.
    pub fn policy(&self) -> ReconnectPolicy {
        self.inner.policy
    }

    /// Endpoint of the underlying source.
    pub fn endpoint(&self) -> &str {
        self.inner.source.endpoint()
    }
}

impl ConnectionMonitor for ConnectionManager {
    fn state(&self) -> ConnectionState {
        *self.inner.state_tx.borrow()
    }

    fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state_tx.subscribe()
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.inner.shutdown();
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: ConnectionState) {
        let changed = self.state_tx.send_if_modified(|state| {
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
        if changed {
            tracing::debug!(state = %next, "Realtime connection state changed");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn start_driver(this: &Arc<Self>, shared: &mut Shared) {
        let generation = this.generation.fetch_add(1, Ordering::SeqCst) + 1;
        this.set_state(ConnectionState::Connecting);

        tracing::debug!(endpoint = this.source.endpoint(), generation, "Opening realtime connection");
        let task = tokio::spawn(Arc::clone(this).run(generation));
        shared.driver = Some(Driver { generation, task });
    }

    async fn run(self: Arc<Self>, generation: u64) {
        let mut frames = match self.source.open().await {
            Ok(frames) => frames,
            Err(e) => {
                self.handle_failure(generation, e);
                return;
            }
        };

        if !self.mark_open(generation) {
            return;
        }

        let error = loop {
            match frames.next().await {
                Some(Ok(frame)) => {
                    // Closed or replaced while a handler ran
                    if !self.is_current(generation) {
                        tracing::debug!(generation, "Stale realtime driver stopping");
                        return;
                    }
                    self.dispatch(&frame);
                }
                Some(Err(e)) => break e,
                None => break TransportError::Closed,
            }
        };

        self.handle_failure(generation, error);
    }

    fn mark_open(&self, generation: u64) -> bool {
        let mut shared = self.lock();
        if !self.is_current(generation) {
            return false;
        }
        shared.reconnect.reset();
        self.set_state(ConnectionState::Connected);
        tracing::info!(endpoint = self.source.endpoint(), "Realtime connection established");
        true
    }

    fn dispatch(&self, frame: &str) {
        match RealtimeEvent::decode(frame) {
            Ok(event) => {
                let delivered = self.bus.emit(&event);
                tracing::trace!(event_type = %event.event_type, delivered, "Realtime event dispatched");
            }
            Err(e) => {
                tracing::warn!(error = %e, frame_len = frame.len(), "Dropping malformed realtime frame");
            }
        }
    }

    fn handle_failure(self: &Arc<Self>, generation: u64, error: TransportError) {
        let mut shared = self.lock();
        if !self.is_current(generation) {
            return;
        }

        shared.driver = None;
        self.set_state(ConnectionState::Disconnected);
        tracing::warn!(endpoint = self.source.endpoint(), error = %error, "Realtime connection lost");

        match shared.reconnect.next_delay(&self.policy) {
            Some(delay) => {
                tracing::info!(
                    attempt = shared.reconnect.attempts(),
                    max_attempts = self.policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Scheduling realtime reconnect"
                );
                let inner = Arc::clone(self);
                shared.pending_retry = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    inner.retry(generation);
                }));
            }
            None => {
                tracing::error!(
                    attempts = shared.reconnect.attempts(),
                    "Max reconnection attempts reached, giving up"
                );
            }
        }
    }

    fn retry(self: &Arc<Self>, scheduled_by: u64) {
        let mut shared = self.lock();
        if !self.is_current(scheduled_by) || shared.driver.is_some() {
            return;
        }
        // This task is finishing; its handle needs no abort
        shared.pending_retry = None;
        Self::start_driver(self, &mut shared);
    }

    fn shutdown(&self) {
        let mut shared = self.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);

        if let Some(retry) = shared.pending_retry.take() {
            retry.abort();
        }
        let had_driver = match shared.driver.take() {
            Some(driver) => {
                driver.task.abort();
                true
            }
            None => false,
        };

        self.set_state(ConnectionState::Disconnected);
        if had_driver {
            tracing::info!(endpoint = self.source.endpoint(), "Realtime connection closed");
        }
    }
}
