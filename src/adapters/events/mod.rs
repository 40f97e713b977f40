//! Event store adapters.
//!
//! - `InMemoryEventStore` - Process-local event log for the binary and tests

mod in_memory_event_store;

pub use in_memory_event_store::InMemoryEventStore;
