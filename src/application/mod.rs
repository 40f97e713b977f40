//! Application layer - Event processing and handlers.
//!
//! This layer coordinates the ports: the event processor reads the event store
//! and hands each record to the handlers registered for its type.

pub mod event_processor;
pub mod handlers;

pub use event_processor::{BatchOutcome, EventProcessor, EventProcessorConfig, HandlerRegistry};
pub use handlers::TalkSessionPushNotificationHandler;
