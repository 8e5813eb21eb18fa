//! End-to-end tests for the HTTP SSE transport.
//!
//! Spins up a local axum server that speaks `text/event-stream` and points
//! the real `HttpEventStreamSource` at it.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures::stream::{self, StreamExt};
use secrecy::SecretString;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use blogstream::adapters::HttpEventStreamSource;
use blogstream::application::RealtimeService;
use blogstream::config::RealtimeConfig;
use blogstream::domain::realtime::EventType;
use blogstream::ports::{ConnectionMonitor, EventStreamSource, TransportError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SESSION_COOKIE: &str = "connect.sid=s%3Atest";

#[derive(Clone, Default)]
struct ServerState {
    connections: Arc<AtomicUsize>,
}

fn frame(event_type: &str, data: serde_json::Value) -> Event {
    Event::default().data(
        json!({"type": event_type, "data": data, "timestamp": "2024-01-15T10:30:00.000Z"})
            .to_string(),
    )
}

/// Streams two blog events and a named event, then stays open.
async fn stream_handler(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    if cookie != Some(SESSION_COOKIE) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.connections.fetch_add(1, Ordering::SeqCst);

    let events = vec![
        Event::default().comment("connected"),
        frame("blog:created", json!({"id": "b1", "title": "First"})),
        Event::default().event("ping").data("{}"),
        frame("blog:created", json!({"id": "b2", "title": "Second"})),
    ];
    let body = stream::iter(events.into_iter().map(Ok::<_, Infallible>)).chain(stream::pending());
    Sse::new(body).into_response()
}

/// Sends one event per connection, then closes the stream.
async fn closing_handler(State(state): State<ServerState>) -> Response {
    let n = state.connections.fetch_add(1, Ordering::SeqCst) + 1;
    let events = vec![frame("follow:added", json!({"userId": format!("u{}", n)}))];
    Sse::new(stream::iter(events.into_iter().map(Ok::<_, Infallible>))).into_response()
}

async fn spawn_server(state: ServerState) -> SocketAddr {
    let app = Router::new()
        .route("/api/events/stream", get(stream_handler))
        .route("/api/events/closing", get(closing_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr, path: &str, cookie: Option<&str>) -> RealtimeConfig {
    RealtimeConfig {
        stream_url: format!("http://{}{}", addr, path),
        reconnect_base_delay_ms: 50,
        session_cookie: cookie.map(|c| SecretString::new(c.to_string())),
        ..Default::default()
    }
}

/// Polls `check` until it holds or five seconds pass.
async fn eventually(check: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn message_events_are_delivered_and_named_events_skipped() {
    let addr = spawn_server(ServerState::default()).await;
    let service =
        RealtimeService::from_config(&config(addr, "/api/events/stream", Some(SESSION_COOKIE)))
            .unwrap();

    let titles = Arc::new(Mutex::new(Vec::new()));
    let t = Arc::clone(&titles);
    let _sub = service.on_fn(EventType::BlogCreated, "Titles", move |event| {
        t.lock().unwrap().push(event.data["title"].as_str().unwrap_or_default().to_string());
        Ok(())
    });

    service.connect();

    assert!(eventually(|| titles.lock().unwrap().len() == 2).await);
    assert_eq!(*titles.lock().unwrap(), vec!["First", "Second"]);
    assert!(service.is_connected());

    service.disconnect();
    assert!(!service.is_connected());
}

#[tokio::test]
async fn non_success_status_is_an_open_failure() {
    let addr = spawn_server(ServerState::default()).await;
    let source = HttpEventStreamSource::new(&config(addr, "/api/events/stream", None)).unwrap();

    match source.open().await {
        Err(err) => assert_eq!(err, TransportError::Status(401)),
        Ok(_) => panic!("expected the unauthenticated open to fail"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpEventStreamSource::new(&config(addr, "/api/events/stream", None)).unwrap();
    assert!(matches!(source.open().await, Err(TransportError::Request(_))));
}

#[tokio::test]
async fn server_closing_the_stream_triggers_reconnect() {
    let state = ServerState::default();
    let connections = Arc::clone(&state.connections);
    let addr = spawn_server(state).await;
    let service =
        RealtimeService::from_config(&config(addr, "/api/events/closing", None)).unwrap();

    let followed = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::clone(&followed);
    let _sub = service.on_fn(EventType::FollowAdded, "Follows", move |event| {
        f.lock().unwrap().push(event.data["userId"].as_str().unwrap_or_default().to_string());
        Ok(())
    });

    service.connect();

    assert!(eventually(|| connections.load(Ordering::SeqCst) >= 2).await);
    assert!(eventually(|| followed.lock().unwrap().len() >= 2).await);
    assert_eq!(followed.lock().unwrap()[..2], ["u1", "u2"]);

    service.disconnect();
}
