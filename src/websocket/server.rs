//! WebSocket server using Axum
//!
//! Upgrades are accepted on any path without origin checks.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::{BroadcastConfig, EchoConfig};
use crate::error::{RelayError, Result};
use crate::relay::ConnectionRegistry;
use crate::shutdown;

use super::{echo, subscriber};

/// What the server does with its connections
#[derive(Clone)]
pub enum WsMode {
    /// Register connections so broadcasts reach them
    Broadcast(ConnectionRegistry),
    /// Echo every message back to its sender
    Echo,
}

impl WsMode {
    fn name(&self) -> &'static str {
        match self {
            WsMode::Broadcast(_) => "broadcast",
            WsMode::Echo => "echo",
        }
    }
}

/// WebSocket server
pub struct WsServer {
    host: String,
    port: u16,
    mode: WsMode,
}

impl WsServer {
    /// Subscriber socket of the broadcaster
    pub fn broadcast(config: &BroadcastConfig, registry: ConnectionRegistry) -> Self {
        Self {
            host: config.host.clone(),
            port: config.ws_port,
            mode: WsMode::Broadcast(registry),
        }
    }

    /// Echo server socket
    pub fn echo(config: &EchoConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            mode: WsMode::Echo,
        }
    }

    pub fn mode(&self) -> &WsMode {
        &self.mode
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        let router = match &self.mode {
            WsMode::Broadcast(registry) => Router::new()
                .fallback(subscriber::subscriber_ws)
                .with_state(registry.clone()),
            WsMode::Echo => Router::new().fallback(echo::echo_ws),
        };

        router.layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until shutdown
    #[instrument(skip(self, shutdown), fields(mode = self.mode.name()))]
    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| RelayError::InvalidConfig(format!("Invalid WebSocket address: {}", e)))?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(&self, listener: TcpListener, shutdown: watch::Receiver<bool>) -> Result<()> {
        let router = self.build_router();

        info!(
            "WebSocket {} server listening on {}",
            self.mode.name(),
            listener.local_addr()?
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        // Upgraded connections outlive the listener
        if let WsMode::Broadcast(registry) = &self.mode {
            registry.clear();
        }

        info!("WebSocket {} server shut down", self.mode.name());
        Ok(())
    }
}
