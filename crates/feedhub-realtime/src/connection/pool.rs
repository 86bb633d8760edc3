//! Connection pool, indexed by connection and by user.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::handle::{ConnectionHandle, ConnectionId};

/// Thread-safe pool of all active WebSocket connections.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    /// User ID → connections in registration order.
    by_user: DashMap<Uuid, Vec<Arc<ConnectionHandle>>>,
    /// Connection ID → handle.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Creates a new empty connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to the pool.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_id.insert(handle.id, Arc::clone(&handle));
        self.by_user.entry(handle.user_id).or_default().push(handle);
    }

    /// Removes a connection from the pool.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(conn_id)?;
        if let Some(mut connections) = self.by_user.get_mut(&handle.user_id) {
            connections.retain(|c| c.id != *conn_id);
        }
        // Re-checked under the shard lock so a concurrent `add` is kept.
        self.by_user
            .remove_if(&handle.user_id, |_, connections| connections.is_empty());
        Some(handle)
    }

    /// Gets all connections for a user, oldest first.
    pub fn get_user_connections(&self, user_id: &Uuid) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Gets a specific connection by ID.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(conn_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns total number of active connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// Returns a snapshot of every connection.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}
