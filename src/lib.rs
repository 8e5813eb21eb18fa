//! Blogstream - Realtime event distribution core.
//!
//! This crate owns the single server-push (SSE) connection of the blogging
//! client, decodes its frames into typed events and fans them out over an
//! in-process event bus to independent consumers (cache invalidation,
//! toasts, notifications, live chat, typing indicators, connection status).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
