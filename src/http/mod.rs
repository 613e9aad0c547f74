//! HTTP server module for the Pulsegram webhook relay
//!
//! This module provides the inbound HTTP surface:
//! - Axum-based web server with routing and graceful shutdown
//! - Webhook payload parsing and the relay pipeline
//!
//! The server exposes the following endpoints:
//! - GET / - plain liveness probe
//! - GET /monday/webhook - endpoint liveness probe
//! - POST /monday/webhook - verification handshake and status-change relay

pub mod handlers;
pub mod payload;
pub mod responses;
pub mod server;

pub use server::start_server;
