//! Post domain entities.

pub mod model;

pub use model::{CreatePost, Post, PostDetail, UpdatePost};
