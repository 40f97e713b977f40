//! StoredEvent - the durable, status-tracked record of a domain event.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainEvent, EventType};
use crate::domain::foundation::{DomainError, EventId, Timestamp};

/// Processing status of a stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Stored and waiting for the processor
    Pending,
    /// Claimed by a processor (defined for stores, never written by the processor)
    Processing,
    /// Every eligible handler succeeded (or no handler matched)
    Processed,
    /// At least one handler failed; fetched again on the next poll
    Failed,
}

impl EventStatus {
    /// Terminal records are never returned by `get_unprocessed_events`.
    ///
    /// Only `processed` is terminal: failed records stay eligible for
    /// redelivery, with no attempt limit.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Processed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Processing => "processing",
            EventStatus::Processed => "processed",
            EventStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain event as persisted in the event log, plus processing metadata.
///
/// Created exactly once at store time. Only the status and outcome fields
/// change afterwards. A failed record may fail again or later succeed; once
/// processed it never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Record identifier (the originating domain event's ID).
    pub id: EventId,

    /// Tag used for storage filtering and handler routing.
    pub event_type: EventType,

    /// Opaque serialized payload owned by producer/consumer pairs.
    pub event_data: Vec<u8>,

    /// Provenance of the event.
    pub aggregate_id: String,
    pub aggregate_type: String,

    pub status: EventStatus,

    /// When the domain event was raised.
    pub occurred_at: Timestamp,

    pub processed_at: Option<Timestamp>,
    pub failed_at: Option<Timestamp>,
    pub failure_reason: Option<String>,

    /// Carried for store implementations; the processor never increments it.
    pub retry_count: u32,
}

impl StoredEvent {
    /// Creates a pending record from raw parts.
    pub fn new(
        event_type: EventType,
        aggregate_id: impl Into<String>,
        aggregate_type: impl Into<String>,
        event_data: Vec<u8>,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            event_data,
            aggregate_id: aggregate_id.into(),
            aggregate_type: aggregate_type.into(),
            status: EventStatus::Pending,
            occurred_at: Timestamp::now(),
            processed_at: None,
            failed_at: None,
            failure_reason: None,
            retry_count: 0,
        }
    }

    /// Projects a domain event into a pending record.
    ///
    /// # Errors
    ///
    /// Returns `SerializationFailed` if the event payload cannot be encoded.
    pub fn from_domain_event(event: &dyn DomainEvent) -> Result<Self, DomainError> {
        Ok(Self {
            id: event.event_id(),
            event_type: event.event_type(),
            event_data: event.event_data()?,
            aggregate_id: event.aggregate_id(),
            aggregate_type: event.aggregate_type().to_string(),
            status: EventStatus::Pending,
            occurred_at: event.occurred_at(),
            processed_at: None,
            failed_at: None,
            failure_reason: None,
            retry_count: 0,
        })
    }

    /// Deserialize the payload into the schema a handler expects.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_slice(&self.event_data).map_err(|e| {
            DomainError::serialization(e)
                .with_detail("event_id", self.id.to_string())
                .with_detail("event_type", self.event_type.to_string())
        })
    }

    /// Transitions to `processed`, also from `failed`. Returns `false` if
    /// already processed.
    pub fn mark_processed(&mut self, at: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = EventStatus::Processed;
        self.processed_at = Some(at);
        true
    }

    /// Transitions to `failed`, replacing any earlier reason. Returns `false`
    /// if already processed.
    pub fn mark_failed(&mut self, reason: impl Into<String>, at: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = EventStatus::Failed;
        self.failed_at = Some(at);
        self.failure_reason = Some(reason.into());
        true
    }
}
