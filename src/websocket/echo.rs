//! Echo WebSocket handler

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, info};

use crate::relay::{echo_reply, ConnectionId, Inbound};

/// WebSocket handler for echo clients
pub async fn echo_ws(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_echo)
}

/// Reply to every message on the connection it arrived on
async fn handle_echo(mut socket: WebSocket) {
    let id = ConnectionId::new();
    info!(connection = %id, "Client connected");

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(Message::Close(_)) => {
                debug!(connection = %id, "Echo WebSocket received close");
                break;
            }
            Ok(msg) => msg,
            Err(e) => {
                debug!(connection = %id, "Echo WebSocket error: {}", e);
                break;
            }
        };

        let Some(reply) = echo_reply(&Inbound::from(msg)) else {
            continue;
        };

        if socket.send(Message::Text(reply)).await.is_err() {
            debug!(connection = %id, "Echo reply dropped, peer gone");
            break;
        }
    }

    info!(connection = %id, "Client disconnected");
}
