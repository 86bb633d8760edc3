//! Bridges post domain events to connected WebSocket clients.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use feedhub_core::events::{DomainEvent, EventPayload, PostEvent};
use feedhub_core::traits::EventPublisher;

use crate::connection::manager::ConnectionManager;
use crate::message::types::OutboundMessage;

/// Publishes every post event to all connected clients.
#[derive(Debug, Clone)]
pub struct PostBroadcaster {
    connections: Arc<ConnectionManager>,
}

impl PostBroadcaster {
    /// Create a broadcaster over a connection manager.
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    fn to_message(event: PostEvent) -> OutboundMessage {
        let action = event.action();
        let post = match event {
            PostEvent::Created { post, .. } | PostEvent::Updated { post, .. } => post,
            PostEvent::Deleted { post_id } => serde_json::Value::String(post_id.to_string()),
        };
        OutboundMessage::Posts { action, post }
    }
}

#[async_trait]
impl EventPublisher for PostBroadcaster {
    async fn publish(&self, event: DomainEvent) {
        let EventPayload::Post(post_event) = event.payload;
        let post_id = post_event.post_id();
        let sent = self.connections.broadcast_all(&Self::to_message(post_event));
        debug!(event_id = %event.id, post_id = %post_id, sent, "Broadcast post event");
    }
}
