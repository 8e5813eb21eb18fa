//! HTTP Server-Sent Events source.
//!
//! Opens the event stream with `reqwest` and parses it with
//! `eventsource-stream`. Only unnamed / `message` events are forwarded;
//! named events and keep-alive comments never reach the manager.

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{future, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL, COOKIE};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::config::RealtimeConfig;
use crate::ports::{EventStreamSource, FrameStream, TransportError};

const MESSAGE_EVENT: &str = "message";

/// `EventStreamSource` over HTTP SSE.
pub struct HttpEventStreamSource {
    client: Client,
    url: String,
    session_cookie: Option<SecretString>,
}

impl HttpEventStreamSource {
    /// Creates a source for the configured endpoint.
    ///
    /// The client has a connect timeout but no overall request timeout,
    /// since the stream is expected to stay open indefinitely.
    pub fn new(config: &RealtimeConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| TransportError::request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.stream_url.clone(),
            session_cookie: config.session_cookie.clone(),
        })
    }
}

#[async_trait]
impl EventStreamSource for HttpEventStreamSource {
    async fn open(&self) -> Result<FrameStream, TransportError> {
        let mut request = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");

        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie.expose_secret().as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let frames = response
            .bytes_stream()
            .eventsource()
            .filter_map(|item| {
                future::ready(match item {
                    Ok(event) if is_message_event(&event.event) => Some(Ok(event.data)),
                    Ok(event) => {
                        tracing::debug!(event = %event.event, "Skipping named SSE event");
                        None
                    }
                    Err(e) => Some(Err(TransportError::stream(e.to_string()))),
                })
            });

        Ok(Box::pin(frames))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

fn is_message_event(name: &str) -> bool {
    name.is_empty() || name == MESSAGE_EVENT
}
