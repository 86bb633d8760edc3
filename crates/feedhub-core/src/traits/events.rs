//! Event publishing seam between services and the real-time engine.

use async_trait::async_trait;

use crate::events::DomainEvent;

/// Sink for domain events.
///
/// Publishing is fire-and-forget: a failed delivery must never fail the
/// operation that produced the event.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish an event to all interested consumers.
    async fn publish(&self, event: DomainEvent);
}
