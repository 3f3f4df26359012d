//! Registry of open WebSocket connections

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Maximum number of messages to buffer per WebSocket connection
pub const WS_BUFFER_SIZE: usize = 256;

/// A text frame queued for one connection
pub type Outbound = String;

/// Identity assigned to a connection when it is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct ConnectionEntry {
    sender: mpsc::Sender<Outbound>,
    connected_at: DateTime<Utc>,
}

/// Set of currently open connections
///
/// Cloning yields another handle to the same set.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<DashMap<ConnectionId, ConnectionEntry>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new connection and return the receiving end of its queue
    pub fn register(&self) -> (ConnectionId, mpsc::Receiver<Outbound>) {
        let id = ConnectionId::new();
        let (sender, receiver) = mpsc::channel(WS_BUFFER_SIZE);

        self.connections.insert(
            id,
            ConnectionEntry {
                sender,
                connected_at: Utc::now(),
            },
        );

        (id, receiver)
    }

    /// Remove a connection, returning when it was accepted
    pub fn remove(&self, id: ConnectionId) -> Option<DateTime<Utc>> {
        self.connections
            .remove(&id)
            .map(|(_, entry)| entry.connected_at)
    }

    /// Drop every connection's queue, which closes their sockets
    pub fn clear(&self) {
        self.connections.clear();
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Senders of every connection open right now
    pub fn snapshot(&self) -> Vec<(ConnectionId, mpsc::Sender<Outbound>)> {
        self.connections
            .iter()
            .map(|entry| (*entry.key(), entry.value().sender.clone()))
            .collect()
    }
}
