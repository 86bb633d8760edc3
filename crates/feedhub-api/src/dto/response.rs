//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Returned by signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Confirmation message.
    pub message: String,
    /// The new user's ID.
    pub user_id: Uuid,
}

/// Returned by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// The logged-in user's ID.
    pub user_id: Uuid,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

/// The caller's status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Status text.
    pub status: String,
}

/// Result of `PUT /post-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Key of the stored image, absent when no file was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active store backend.
    pub database: String,
    /// Whether the store answered.
    pub database_healthy: bool,
    /// Whether image storage answered.
    pub storage_healthy: bool,
    /// Open WebSocket connections.
    pub ws_connections: usize,
    /// Distinct users with at least one open connection.
    pub ws_users: usize,
}
