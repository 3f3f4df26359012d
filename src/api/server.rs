//! HTTP ingress server using Axum
//!
//! Accepts notifications on `POST /` and hands their payloads to the
//! broadcaster.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::BroadcastConfig;
use crate::error::{RelayError, Result};
use crate::relay::Broadcaster;
use crate::shutdown;

use super::routes;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub broadcaster: Broadcaster,
}

/// HTTP ingress server
pub struct HttpServer {
    config: BroadcastConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: BroadcastConfig, broadcaster: Broadcaster) -> Self {
        Self {
            config,
            state: AppState { broadcaster },
        }
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        routes::create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until shutdown
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.http_port)
            .parse()
            .map_err(|e| RelayError::InvalidConfig(format!("Invalid HTTP address: {}", e)))?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(&self, listener: TcpListener, shutdown: watch::Receiver<bool>) -> Result<()> {
        let router = self.build_router();

        info!("HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        info!("HTTP server shut down");
        Ok(())
    }
}
