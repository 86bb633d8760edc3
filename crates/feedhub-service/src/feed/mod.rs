//! Feed posts: listing, creation, editing and deletion.

pub mod input;
pub mod service;
pub mod view;

pub use input::PostInput;
pub use service::FeedService;
pub use view::{CreatorView, PostView};
