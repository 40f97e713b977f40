//! Deliberation Events - Asynchronous domain-event processing engine
//!
//! Aggregates of the deliberation platform record domain events while they
//! change state. The events are persisted to an event store in the same unit
//! of work, and a background [`EventProcessor`](application::EventProcessor)
//! later dispatches them to priority-ordered handlers with at-least-once
//! delivery.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
