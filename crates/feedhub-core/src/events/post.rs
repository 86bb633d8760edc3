//! Post-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to feed posts.
///
/// `post` carries the serialized post as clients see it, so the
/// broadcaster does not need to know the entity types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PostEvent {
    /// A post was created.
    Created {
        /// The post ID.
        post_id: Uuid,
        /// Snapshot of the new post.
        post: serde_json::Value,
    },
    /// A post was edited.
    Updated {
        /// The post ID.
        post_id: Uuid,
        /// Snapshot of the post after the edit.
        post: serde_json::Value,
    },
    /// A post was deleted.
    Deleted {
        /// The post ID.
        post_id: Uuid,
    },
}

/// The action a [`PostEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostAction {
    /// See [`PostEvent::Created`].
    Created,
    /// See [`PostEvent::Updated`].
    Updated,
    /// See [`PostEvent::Deleted`].
    Deleted,
}

impl PostEvent {
    /// The post this event refers to.
    pub fn post_id(&self) -> Uuid {
        match self {
            Self::Created { post_id, .. }
            | Self::Updated { post_id, .. }
            | Self::Deleted { post_id } => *post_id,
        }
    }

    /// The action described by this event.
    pub fn action(&self) -> PostAction {
        match self {
            Self::Created { .. } => PostAction::Created,
            Self::Updated { .. } => PostAction::Updated,
            Self::Deleted { .. } => PostAction::Deleted,
        }
    }
}
