//! Client-facing post representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use feedhub_entity::post::PostDetail;

/// The creator of a post, as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorView {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// A post as returned by the REST and GraphQL APIs and broadcast to
/// WebSocket clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    /// Post ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Storage key of the image.
    pub image_url: String,
    /// Who wrote it.
    pub creator: CreatorView,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl From<PostDetail> for PostView {
    fn from(detail: PostDetail) -> Self {
        let post = detail.post;
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator: CreatorView {
                id: post.creator_id,
                name: detail.creator_name,
            },
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
