//! `AuthUser` extractor: pulls the JWT from the Authorization header,
//! validates it and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::{debug, warn};

use feedhub_auth::jwt::bearer_token;
use feedhub_core::error::AppError;
use feedhub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<RequestContext, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Not authenticated."))?;

    let token = bearer_token(header)
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let claims = state.jwt_decoder.decode(token)?;
    Ok(RequestContext::from(claims))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state) {
            Ok(ctx) => Ok(AuthUser(ctx)),
            Err(e) => {
                warn!(path = %parts.uri.path(), reason = %e.message, "Rejected unauthenticated request");
                Err(ApiError(e))
            }
        }
    }
}

/// Soft authentication: the context when a valid token was sent,
/// `None` otherwise. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct OptionalAuth(pub Option<RequestContext>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Self(None));
        }
        match authenticate(parts, state) {
            Ok(ctx) => Ok(Self(Some(ctx))),
            Err(e) => {
                debug!(reason = %e.message, "Ignoring invalid token on soft-auth route");
                Ok(Self(None))
            }
        }
    }
}
