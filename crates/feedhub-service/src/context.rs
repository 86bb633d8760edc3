//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use feedhub_auth::jwt::Claims;

/// Context for the current authenticated request.
///
/// Built from verified token claims and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email (from the token).
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            request_time: Utc::now(),
        }
    }
}

impl From<Claims> for RequestContext {
    fn from(claims: Claims) -> Self {
        Self::new(claims.user_id, claims.email)
    }
}
