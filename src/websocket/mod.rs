//! WebSocket ingress
//!
//! One listener per variant: subscribers receive broadcasts, echo clients get
//! their messages back with a prefix.

pub mod echo;
pub mod server;
pub mod subscriber;

use axum::extract::ws::Message;

use crate::relay::Inbound;

pub use server::{WsMode, WsServer};

impl From<Message> for Inbound {
    fn from(message: Message) -> Self {
        match message {
            Message::Text(text) => Inbound::Text(text),
            Message::Binary(bytes) => Inbound::Binary(bytes),
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) => Inbound::Control,
        }
    }
}
