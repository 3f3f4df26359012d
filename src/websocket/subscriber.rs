//! Broadcast subscriber WebSocket handler

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::relay::ConnectionRegistry;

/// WebSocket handler for broadcast subscribers
pub async fn subscriber_ws(
    ws: WebSocketUpgrade,
    State(registry): State<ConnectionRegistry>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_subscriber(socket, registry))
}

/// Handle one subscriber from accept until disconnect
async fn handle_subscriber(socket: WebSocket, registry: ConnectionRegistry) {
    let (mut sender, mut receiver) = socket.split();
    let (id, mut rx) = registry.register();

    info!(connection = %id, "Client connected");

    // Forward broadcasts to the socket; a closed queue means the server is
    // shutting down
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text)).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    // Client data is ignored; reading only tracks the connection lifetime
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    debug!("Subscriber WebSocket received close");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("Subscriber WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {}
        _ = &mut receive_task => {}
    }

    let connected_at = registry.remove(id);

    send_task.abort();
    receive_task.abort();
    let _ = tokio::join!(send_task, receive_task);

    match connected_at {
        Some(at) => info!(
            connection = %id,
            duration_ms = (chrono::Utc::now() - at).num_milliseconds(),
            "Client disconnected"
        ),
        None => info!(connection = %id, "Client disconnected"),
    }
}
