//! EventRecorder - per-aggregate buffer of raised domain events.
//!
//! An aggregate embeds a recorder and appends events while a business
//! operation runs. The unit of work flushes the buffer to the event store in
//! the same transaction as the aggregate's state change, then clears it so a
//! retried operation does not record the same events twice.
//!
//! The recorder is owned by exactly one aggregate instance and is not shared
//! across threads.

use super::{DomainEvent, EventType};

/// Ordered, append-only buffer of domain events raised by one aggregate.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<Box<dyn DomainEvent>>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event. No deduplication or validation is performed.
    pub fn record_event<E>(&mut self, event: E)
    where
        E: DomainEvent + 'static,
    {
        self.events.push(Box::new(event));
    }

    /// Returns the recorded events in recording order.
    pub fn recorded_events(&self) -> &[Box<dyn DomainEvent>] {
        &self.events
    }

    /// Empties the buffer after a successful flush.
    pub fn clear_recorded_events(&mut self) {
        self.events.clear();
    }

    /// Moves the recorded events out, leaving the buffer empty.
    pub fn take_recorded_events(&mut self) -> Vec<Box<dyn DomainEvent>> {
        std::mem::take(&mut self.events)
    }

    /// Checks whether an event of the given type has been recorded.
    pub fn has_recorded(&self, event_type: &EventType) -> bool {
        self.events.iter().any(|e| &e.event_type() == event_type)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
