//! Request DTOs.

use serde::{Deserialize, Serialize};

use feedhub_service::SignupInput;

/// PUT /auth/signup body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            password: req.password,
        }
    }
}

/// POST /auth/login body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// PATCH /auth/status body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status line.
    pub status: String,
}
