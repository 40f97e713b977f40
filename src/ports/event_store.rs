//! EventStore port - durable log of domain events with processing status.
//!
//! This is the contract the persistence layer satisfies for the event
//! processor. It follows the transactional outbox pattern:
//!
//! 1. The unit of work stores an aggregate's recorded events in the same
//!    transaction as the aggregate's state change
//! 2. `EventProcessor` polls `get_unprocessed_events` in the background
//! 3. After dispatch it marks each record processed or failed
//!
//! Fetch and mark are independent round trips with no enclosing
//! transaction, so delivery is at-least-once.

use async_trait::async_trait;

use crate::domain::event::{DomainEvent, EventId, EventType, StoredEvent};
use crate::domain::foundation::DomainError;

/// Port for the durable event log.
///
/// Implementations should:
/// - Persist events inside the caller's transaction where one is active
/// - Keep `get_unprocessed_events` free of side effects
/// - Make both mark operations idempotent
///
/// # Example
///
/// ```ignore
/// // In a unit of work:
/// session.start_session()?;
/// repo.update(&session).await?;
/// event_store.store_batch(&session.take_recorded_events()).await?;
/// ```
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a single event as a pending record.
    async fn store(&self, event: &dyn DomainEvent) -> Result<(), DomainError>;

    /// Persist several events atomically, in order.
    async fn store_batch(&self, events: &[Box<dyn DomainEvent>]) -> Result<(), DomainError>;

    /// Return up to `limit` records whose type is in `event_types` and whose
    /// status is `pending`, `processing` or `failed`.
    ///
    /// Records are returned in occurrence order. Failed records come back on
    /// every poll; there is no attempt limit.
    async fn get_unprocessed_events(
        &self,
        event_types: &[EventType],
        limit: usize,
    ) -> Result<Vec<StoredEvent>, DomainError>;

    /// Transition a record (including a failed one) to `processed`. Idempotent.
    async fn mark_as_processed(&self, id: EventId) -> Result<(), DomainError>;

    /// Transition a record to `failed`, keeping a human-readable reason.
    /// A no-op for processed records.
    async fn mark_as_failed(&self, id: EventId, reason: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventStore) {}

    fn assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn event_store_is_send_sync() {
        assert_send_sync::<crate::adapters::InMemoryEventStore>();
        assert_send_sync::<dyn EventStore>();
    }
}
