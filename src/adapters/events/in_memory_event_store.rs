//! In-memory event store.
//!
//! Keeps the whole log in a `Vec` behind an async `RwLock`. Used by the
//! binary when no database is configured and by tests that need a real
//! [`EventStore`] rather than a call-counting fake.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::event::{DomainEvent, EventId, EventStatus, EventType, StoredEvent};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::EventStore;

/// Event log kept in process memory.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryEventStore::new();
/// store.store_batch(session.recorded_events()).await?;
///
/// assert_eq!(store.count_with_status(EventStatus::Pending).await, 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<StoredEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Insert a prepared record as-is, bypassing serialization.
    pub async fn insert(&self, event: StoredEvent) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        ensure_unique(&events, event.id)?;
        events.push(event);
        Ok(())
    }

    pub async fn get(&self, id: EventId) -> Option<StoredEvent> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    pub async fn all(&self) -> Vec<StoredEvent> {
        self.events.read().await.clone()
    }

    pub async fn count_with_status(&self, status: EventStatus) -> usize {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.status == status)
            .count()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    async fn update<F>(&self, id: EventId, apply: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut StoredEvent),
    {
        let mut events = self.events.write().await;
        let event = events.iter_mut().find(|e| e.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::EventNotFound, "Event not found")
                .with_detail("event_id", id.to_string())
        })?;
        apply(event);
        Ok(())
    }
}

fn ensure_unique(events: &[StoredEvent], id: EventId) -> Result<(), DomainError> {
    if events.iter().any(|e| e.id == id) {
        return Err(
            DomainError::new(ErrorCode::DuplicateEvent, "Event already stored")
                .with_detail("event_id", id.to_string()),
        );
    }
    Ok(())
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn store(&self, event: &dyn DomainEvent) -> Result<(), DomainError> {
        let record = StoredEvent::from_domain_event(event)?;
        self.insert(record).await
    }

    async fn store_batch(&self, events: &[Box<dyn DomainEvent>]) -> Result<(), DomainError> {
        // Encode everything first so a bad payload leaves the log untouched.
        let records = events
            .iter()
            .map(|e| StoredEvent::from_domain_event(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut stored = self.events.write().await;
        for (i, record) in records.iter().enumerate() {
            ensure_unique(&stored, record.id)?;
            if records[..i].iter().any(|r| r.id == record.id) {
                return Err(
                    DomainError::new(ErrorCode::DuplicateEvent, "Duplicate event in batch")
                        .with_detail("event_id", record.id.to_string()),
                );
            }
        }
        stored.extend(records);
        Ok(())
    }

    async fn get_unprocessed_events(
        &self,
        event_types: &[EventType],
        limit: usize,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        let events = self.events.read().await;
        let mut pending: Vec<StoredEvent> = events
            .iter()
            .filter(|e| !e.status.is_terminal() && event_types.contains(&e.event_type))
            .cloned()
            .collect();
        // Stable, so records with equal timestamps stay in insertion order.
        pending.sort_by_key(|e| e.occurred_at);
        pending.truncate(limit);
        Ok(pending)
    }

    async fn mark_as_processed(&self, id: EventId) -> Result<(), DomainError> {
        self.update(id, |e| {
            e.mark_processed(Timestamp::now());
        })
        .await
    }

    async fn mark_as_failed(&self, id: EventId, reason: &str) -> Result<(), DomainError> {
        self.update(id, |e| {
            e.mark_failed(reason, Timestamp::now());
        })
        .await
    }
}
