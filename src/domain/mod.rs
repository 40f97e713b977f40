//! Domain layer - events, the aggregates that raise them and shared primitives.

pub mod event;
pub mod foundation;
pub mod notification;
pub mod talksession;
