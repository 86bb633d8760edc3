//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// A handle to a single WebSocket connection.
///
/// Holds the sender for pushing serialized frames to the socket task,
/// plus the identity of the user behind it.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// User who owns this connection
    pub user_id: Uuid,
    /// Email from the token the socket authenticated with
    pub email: String,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<String>,
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(user_id: Uuid, email: String, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Queue a text frame for this connection.
    ///
    /// Never blocks: a full queue drops the frame, a closed queue marks
    /// the handle dead.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Check if connection is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark connection as closed
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
