//! Custom Axum extractors.

pub mod auth;
pub mod multipart;
pub mod pagination;
pub mod path;

pub use auth::{AuthUser, OptionalAuth};
pub use multipart::{ImageForm, PostForm};
pub use pagination::PostsQuery;
pub use path::parse_post_id;
