//! Event module - domain events and their durable records.
//!
//! - `DomainEvent` / `EventType` - What aggregates raise
//! - `EventRecorder` - Per-aggregate buffer flushed by the unit of work
//! - `StoredEvent` / `EventStatus` - What the event store persists and the
//!   processor consumes

mod domain_event;
mod recorder;
mod stored_event;

pub use domain_event::{encode_event_data, DomainEvent, EventType};
pub use recorder::EventRecorder;
pub use stored_event::{EventStatus, StoredEvent};

pub use crate::domain::foundation::EventId;
