//! Only the creator of a resource may change it.

use tracing::warn;
use uuid::Uuid;

use feedhub_core::error::AppError;
use feedhub_entity::post::{Post, PostDetail};

/// A resource with a recorded creator.
pub trait Owned {
    /// The user who created the resource.
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.creator_id
    }
}

impl Owned for PostDetail {
    fn owner_id(&self) -> Uuid {
        self.post.creator_id
    }
}

/// Fail with an authorization error unless `actor_id` created `resource`.
pub fn require_owner<T: Owned + ?Sized>(actor_id: Uuid, resource: &T) -> Result<(), AppError> {
    let owner_id = resource.owner_id();
    if owner_id != actor_id {
        warn!(actor_id = %actor_id, owner_id = %owner_id, "Rejected change by non-owner");
        return Err(AppError::authorization("Not authorized!"));
    }
    Ok(())
}
