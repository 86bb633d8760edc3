//! # feedhub-service
//!
//! Business logic service layer for FeedHub. Each service orchestrates
//! the stores, image storage, authentication primitives and the event
//! publisher to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod feed;
pub mod image;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthService, LoginResult, SignupInput};
pub use context::RequestContext;
pub use feed::{CreatorView, FeedService, PostInput, PostView};
pub use image::{ImageService, ImageUpload};
pub use user::{EditUserInput, UserService};
