//! Typed path parameter helpers.

use uuid::Uuid;

use feedhub_core::error::AppError;

/// Parses a post ID from a path segment.
///
/// A malformed ID cannot name an existing post, so it reports 404.
pub fn parse_post_id(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found("Could not find post."))
}
