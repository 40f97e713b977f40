//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types shared by every
//! other domain module.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{EventId, OrganizationId, TalkSessionId, UserId};
pub use timestamp::Timestamp;
