//! Broadcaster - Entry Point
//!
//! Starts the HTTP ingress and the subscriber WebSocket with graceful
//! shutdown support.

use tokio::task::JoinHandle;
use tracing::{error, info};

use wsrelay::api::HttpServer;
use wsrelay::error::Result;
use wsrelay::relay::{Broadcaster, ConnectionRegistry};
use wsrelay::websocket::WsServer;
use wsrelay::{logging, shutdown, Config, RelayError};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log);

    info!("Starting broadcaster");

    let registry = ConnectionRegistry::new();
    let broadcaster = Broadcaster::new(registry.clone());

    let http_server = HttpServer::new(config.broadcast.clone(), broadcaster);
    let ws_server = WsServer::broadcast(&config.broadcast, registry);

    let shutdown_rx = shutdown::watch_signals();

    let http_task = tokio::spawn({
        let shutdown = shutdown_rx.clone();
        async move { http_server.run(shutdown).await }
    });
    let ws_task = tokio::spawn({
        let shutdown = shutdown_rx.clone();
        async move { ws_server.run(shutdown).await }
    });

    info!(
        "Servers started - HTTP: {}, WebSocket: {}",
        config.http_addr(),
        config.broadcast_ws_addr()
    );

    let result = tokio::try_join!(flatten(http_task), flatten(ws_task));
    if let Err(e) = result {
        error!("Server error: {}", e);
        return Err(e);
    }

    info!("Broadcaster stopped");
    Ok(())
}

/// Surface both server errors and task panics as one result
async fn flatten(handle: JoinHandle<Result<()>>) -> Result<()> {
    match handle.await {
        Ok(result) => result,
        Err(e) => Err(RelayError::Internal(e.to_string())),
    }
}
