//! Inbound and outbound WebSocket message type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use feedhub_core::events::PostAction;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Keep-alive probe; answered with [`OutboundMessage::Pong`].
    Ping,
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Sent once after the socket is registered.
    Connected {
        /// Connection ID assigned by the server.
        connection_id: Uuid,
        /// The authenticated user.
        user_id: Uuid,
    },
    /// A post was created, updated or deleted.
    ///
    /// For deletions `post` is the bare post ID.
    Posts {
        /// What happened to the post.
        action: PostAction,
        /// The post as clients see it.
        post: serde_json::Value,
    },
    /// Answer to [`InboundMessage::Ping`].
    Pong {
        /// Server time.
        timestamp: DateTime<Utc>,
    },
    /// The client sent something the server could not handle.
    Error {
        /// Machine-readable code.
        code: String,
        /// Description.
        message: String,
    },
}

impl OutboundMessage {
    /// Serialize to the JSON text frame sent over the socket.
    pub fn to_text(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize outbound message");
                None
            }
        }
    }
}
