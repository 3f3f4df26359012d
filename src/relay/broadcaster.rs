//! Fan-out of one payload to every open connection

use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

use super::payload::Payload;
use super::registry::ConnectionRegistry;

/// Sends payloads to every connection in a registry
#[derive(Clone)]
pub struct Broadcaster {
    registry: ConnectionRegistry,
}

impl Broadcaster {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Queue `payload` on every connection open at call time
    ///
    /// Returns how many connections accepted it. Full or closed queues are
    /// skipped.
    pub fn broadcast(&self, payload: &Payload) -> usize {
        let text = payload.to_text();
        let mut delivered = 0;

        for (id, sender) in self.registry.snapshot() {
            match sender.try_send(text.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    debug!(connection = %id, "WebSocket buffer full, dropping broadcast");
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(connection = %id, "WebSocket already closed, dropping broadcast");
                }
            }
        }

        delivered
    }
}
