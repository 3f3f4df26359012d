//! HTTP ingress
//!
//! Receives notifications over HTTP and broadcasts them to WebSocket clients.

pub mod handlers;
pub mod routes;
pub mod server;

pub use server::{AppState, HttpServer};
