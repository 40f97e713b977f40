//! Event processing - routing and background dispatch of stored events.
//!
//! - [`HandlerRegistry`] maps event types to priority-ordered handlers
//! - [`EventProcessor`] polls the [`EventStore`](crate::ports::EventStore)
//!   and dispatches each pending record to its handlers

mod processor;
mod registry;

pub use processor::{BatchOutcome, EventProcessor, EventProcessorConfig};
pub use registry::HandlerRegistry;
