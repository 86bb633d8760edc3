//! Real-time WebSocket engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Maximum WebSocket connections per user.
    #[serde(default = "default_max_connections_per_user")]
    pub max_connections_per_user: usize,
    /// Outbound queue size for each connection.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            max_connections_per_user: default_max_connections_per_user(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_max_connections_per_user() -> usize {
    5
}

fn default_channel_buffer() -> usize {
    256
}
