//! ConnectionMonitor port - Read-only view of the transport's status.
//!
//! Consumers observe the connection; only the connection manager
//! changes it. Status is push-based: transitions are published on a
//! watch channel as they happen.

use tokio::sync::watch;

use crate::domain::realtime::ConnectionState;

/// Port for observing the realtime connection.
pub trait ConnectionMonitor: Send + Sync {
    /// Point-in-time query; not a guarantee the next frame will arrive.
    fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Current lifecycle state.
    fn state(&self) -> ConnectionState;

    /// Receiver notified on every state transition.
    fn watch_state(&self) -> watch::Receiver<ConnectionState>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(watch::Sender<ConnectionState>);

    impl ConnectionMonitor for Fixed {
        fn state(&self) -> ConnectionState {
            *self.0.borrow()
        }

        fn watch_state(&self) -> watch::Receiver<ConnectionState> {
            self.0.subscribe()
        }
    }

    #[test]
    fn is_connected_follows_state() {
        let (tx, _rx) = watch::channel(ConnectionState::Connecting);
        let monitor = Fixed(tx);
        assert!(!monitor.is_connected());

        monitor.0.send_replace(ConnectionState::Connected);
        assert!(monitor.is_connected());
    }
}
