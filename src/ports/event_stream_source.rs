//! EventStreamSource port - Interface for opening the server-push stream.
//!
//! The connection manager owns lifecycle and retry policy; a source only
//! knows how to open one stream and yield the raw `data` text of each
//! frame. Production uses HTTP SSE, tests use scripted sources.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Stream of frame bodies. An `Err` item ends the connection.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<String, TransportError>> + Send>>;

/// Transport-level failures. All of them trigger the reconnect procedure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Failed to open event stream: {0}")]
    Request(String),

    #[error("Event stream endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Event stream failed: {0}")]
    Stream(String),

    #[error("Event stream closed by server")]
    Closed,
}

impl TransportError {
    /// Creates a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        TransportError::Request(msg.into())
    }

    /// Creates a mid-stream error.
    pub fn stream(msg: impl Into<String>) -> Self {
        TransportError::Stream(msg.into())
    }
}

/// Port for opening the realtime event stream.
#[async_trait]
pub trait EventStreamSource: Send + Sync {
    /// Opens a new stream.
    ///
    /// Resolves once the server has accepted the connection; frames then
    /// arrive on the returned stream until it errors or ends.
    async fn open(&self) -> Result<FrameStream, TransportError>;

    /// Endpoint description for logs.
    fn endpoint(&self) -> &str;
}
