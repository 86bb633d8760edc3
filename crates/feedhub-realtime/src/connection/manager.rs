//! Connection manager: connection lifecycle and message routing.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use feedhub_core::config::realtime::RealtimeConfig;

use crate::message::types::{InboundMessage, OutboundMessage};

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    pool: ConnectionPool,
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: ConnectionPool::new(),
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Returns the connection handle and the receiver of its outbound
    /// frames. The receiver yields `None` once the handle has been
    /// unregistered or evicted and every clone of it dropped, so callers
    /// should keep only the connection ID.
    pub fn register(
        &self,
        user_id: Uuid,
        email: String,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size.max(1));
        let handle = Arc::new(ConnectionHandle::new(user_id, email, tx));

        let existing = self.pool.get_user_connections(&user_id);
        if existing.len() >= self.config.max_connections_per_user {
            warn!(
                user_id = %user_id,
                count = existing.len(),
                max = self.config.max_connections_per_user,
                "User at max connections, oldest will be replaced"
            );
            let excess = existing.len() + 1 - self.config.max_connections_per_user.max(1);
            for oldest in existing.iter().take(excess) {
                oldest.mark_closed();
                self.pool.remove(&oldest.id);
            }
        }

        self.pool.add(Arc::clone(&handle));

        let hello = OutboundMessage::Connected {
            connection_id: handle.id,
            user_id,
        };
        if let Some(frame) = hello.to_text() {
            handle.send(frame);
        }

        info!(
            conn_id = %handle.id,
            user_id = %user_id,
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_closed();
            info!(
                conn_id = %conn_id,
                user_id = %handle.user_id,
                "WebSocket connection unregistered"
            );
        }
    }

    /// Handles a text frame received from a client.
    pub fn handle_inbound(&self, conn_id: &ConnectionId, raw: &str) {
        let Some(handle) = self.pool.get(conn_id) else {
            debug!(conn_id = %conn_id, "Inbound message for unknown connection");
            return;
        };

        let reply = match serde_json::from_str::<InboundMessage>(raw) {
            Ok(InboundMessage::Ping) => OutboundMessage::Pong {
                timestamp: Utc::now(),
            },
            Err(e) => {
                debug!(conn_id = %conn_id, error = %e, "Invalid inbound message");
                OutboundMessage::Error {
                    code: "INVALID_MESSAGE".to_string(),
                    message: format!("Invalid message: {e}"),
                }
            }
        };

        if let Some(frame) = reply.to_text() {
            handle.send(frame);
        }
    }

    /// Broadcasts a message to all connected clients.
    ///
    /// Returns how many connections accepted the frame.
    pub fn broadcast_all(&self, message: &OutboundMessage) -> usize {
        let Some(frame) = message.to_text() else {
            return 0;
        };

        let mut sent = 0;
        for conn in self.pool.all_connections() {
            if conn.send(frame.clone()) {
                sent += 1;
            } else if !conn.is_alive() {
                self.pool.remove(&conn.id);
            }
        }
        sent
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            conn.mark_closed();
            self.pool.remove(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }

    /// Checks if a user is currently connected.
    pub fn is_user_connected(&self, user_id: &Uuid) -> bool {
        !self.pool.get_user_connections(user_id).is_empty()
    }
}
