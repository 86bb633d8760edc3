//! JWT token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use feedhub_core::config::auth::AuthConfig;
use feedhub_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Creates signed HS256 tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").finish_non_exhaustive()
    }
}

/// A freshly signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Sign a token for `user_id` that expires one hour from now.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Sign a token as if issued at `now`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = now + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign token", e)
        })?;

        Ok(IssuedToken { token, expires_at })
    }
}
