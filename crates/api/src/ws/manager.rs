use std::collections::HashMap;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::Message;
use chrono::Utc;
use drivesafe_core::types::Timestamp;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket subscriber.
pub struct WsConnection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Registry of real-time subscribers.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Publishing holds the read lock for the
/// whole fan-out, so a concurrent `add` or `remove` waits for it instead of
/// changing the set mid-iteration.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new subscriber.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink. Re-using an id replaces the
    /// previous subscriber.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            sender: tx,
            connected_at: Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a subscriber by its ID.
    ///
    /// Returns how long it was connected, or `None` for an unknown ID.
    pub async fn remove(&self, conn_id: &str) -> Option<chrono::Duration> {
        let conn = self.connections.write().await.remove(conn_id)?;
        Some(Utc::now() - conn.connected_at)
    }

    /// Deliver a message to every connected subscriber.
    ///
    /// Best effort: nothing is queued for subscribers that join later, and a
    /// subscriber whose channel is closed does not affect the others. Closed
    /// subscribers are dropped from the registry afterwards. Returns the
    /// number of subscribers the message was handed to.
    pub async fn publish(&self, message: Message) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();

        {
            let conns = self.connections.read().await;
            for (id, conn) in conns.iter() {
                if conn.sender.send(message.clone()).is_ok() {
                    delivered += 1;
                } else {
                    dead.push(id.clone());
                }
            }
        }

        if !dead.is_empty() {
            let mut conns = self.connections.write().await;
            for id in &dead {
                // Only drop it if it is still the closed connection.
                if conns.get(id).is_some_and(|c| c.sender.is_closed()) {
                    conns.remove(id);
                }
            }
            tracing::debug!(removed = dead.len(), "Dropped closed WebSocket subscribers");
        }

        delivered
    }

    /// Return the current number of subscribers.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every subscriber and clear the registry, then
    /// wait up to `grace` for each connection to take its frame.
    ///
    /// A connection has taken its frame once its receiver is dropped, which
    /// the per-connection sender task does right after writing Close.
    /// Returns `false` if the grace period ran out first. Used during
    /// graceful shutdown.
    pub async fn shutdown_all(&self, grace: Duration) -> bool {
        let senders: Vec<WsSender> = {
            let mut conns = self.connections.write().await;
            conns.drain().map(|(_, conn)| conn.sender).collect()
        };
        for sender in &senders {
            let _ = sender.send(Message::Close(None));
        }

        let flushed = tokio::time::timeout(
            grace,
            futures::future::join_all(senders.iter().map(|s| s.closed())),
        )
        .await
        .is_ok();

        tracing::info!(count = senders.len(), flushed, "Closed all WebSocket connections");
        flushed
    }

    /// Send a Ping frame to every subscriber.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
