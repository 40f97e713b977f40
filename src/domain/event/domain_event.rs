//! Domain event contract.
//!
//! - `EventType` - Routing tag shared by storage filtering and handler lookup
//! - `DomainEvent` - Trait that every event raised by an aggregate implements
//! - `domain_event!` - Macro to implement `DomainEvent` for serde structs

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::domain::foundation::{DomainError, EventId, Timestamp};

/// Tag identifying the kind of a domain event (e.g., "talksession.started").
///
/// Event types are usually declared as constants with [`EventType::from_static`];
/// values read back from storage are owned strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(Cow<'static, str>);

impl EventType {
    /// Creates an event type from a string literal (usable in `const`).
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Creates an event type from an owned or borrowed string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Trait that all domain events must implement.
///
/// A domain event is an immutable fact raised by an aggregate. The event store
/// persists it as a [`StoredEvent`](super::StoredEvent) whose payload is the
/// bytes returned by [`DomainEvent::event_data`]; the payload schema is a
/// private contract between the producer and the handlers of its event type.
pub trait DomainEvent: Send + Sync + fmt::Debug {
    /// Returns the unique ID for this event instance.
    fn event_id(&self) -> EventId;

    /// Returns the event type used for storage filtering and handler routing.
    fn event_type(&self) -> EventType;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Returns the ID of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    /// Returns the type of aggregate (e.g., "TalkSession").
    fn aggregate_type(&self) -> &'static str;

    /// Serializes the event into its opaque payload.
    fn event_data(&self) -> Result<Vec<u8>, DomainError>;
}

/// Serializes an event struct to the JSON payload stored with its record.
pub fn encode_event_data<T: Serialize + ?Sized>(event: &T) -> Result<Vec<u8>, DomainError> {
    serde_json::to_vec(event).map_err(DomainError::serialization)
}

/// Macro to implement DomainEvent trait with minimal boilerplate.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct TalkSessionStarted {
///     pub event_id: EventId,
///     pub talk_session_id: TalkSessionId,
///     pub occurred_at: Timestamp,
/// }
///
/// domain_event!(
///     TalkSessionStarted,
///     event_type = TALK_SESSION_STARTED,
///     aggregate_id = talk_session_id,
///     aggregate_type = "TalkSession",
///     occurred_at = occurred_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::event::DomainEvent for $event_name {
            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field
            }

            fn event_type(&self) -> $crate::domain::event::EventType {
                $event_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn event_data(&self) -> Result<Vec<u8>, $crate::domain::foundation::DomainError> {
                $crate::domain::event::encode_event_data(self)
            }
        }
    };
}
