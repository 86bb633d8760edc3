//! Top-level real-time engine.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use feedhub_core::config::realtime::RealtimeConfig;
use feedhub_core::traits::EventPublisher;

use crate::broadcaster::PostBroadcaster;
use crate::connection::manager::ConnectionManager;

/// Owns the connection manager and the publisher services emit into.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    broadcaster: Arc<PostBroadcaster>,
    shutdown_tx: broadcast::Sender<()>,
}

impl RealtimeEngine {
    /// Creates a new real-time engine.
    pub fn new(config: &RealtimeConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let connections = Arc::new(ConnectionManager::new(config.clone()));
        let broadcaster = Arc::new(PostBroadcaster::new(Arc::clone(&connections)));

        info!(
            max_connections_per_user = config.max_connections_per_user,
            "Real-time engine initialized"
        );

        Self {
            connections,
            broadcaster,
            shutdown_tx,
        }
    }

    /// The publisher to hand to services.
    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        Arc::clone(&self.broadcaster) as Arc<dyn EventPublisher>
    }

    /// Returns a receiver that fires when the engine shuts down.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signals socket tasks to stop and drops every connection.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");
        let _ = self.shutdown_tx.send(());
        self.connections.close_all();
    }
}
