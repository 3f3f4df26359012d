//! wsrelay - HTTP and WebSocket message relay
//!
//! Two standalone servers and a small client:
//!
//! - Broadcaster: `POST /` on the HTTP port delivers the posted `payload` to
//!   every WebSocket client connected to the subscriber port
//! - Echo server: every WebSocket message is answered with `Echo: <message>`
//!   on the connection it came from
//! - Listener: prints the messages a relay socket sends

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod relay;
pub mod shutdown;
pub mod websocket;

pub use config::Config;
pub use error::{RelayError, Result};
