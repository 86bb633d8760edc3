//! Domain events emitted by FeedHub operations.
//!
//! Events are handed to an [`EventPublisher`](crate::traits::EventPublisher)
//! and consumed by the real-time engine.

pub mod post;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use post::{PostAction, PostEvent};

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<Uuid>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A post-related event.
    Post(PostEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<Uuid>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Shorthand for a post event caused by `actor_id`.
    pub fn post(actor_id: Uuid, event: PostEvent) -> Self {
        Self::new(Some(actor_id), EventPayload::Post(event))
    }
}
