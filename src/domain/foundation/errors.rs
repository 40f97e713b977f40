//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Not found errors
    EventNotFound,

    // State errors
    DuplicateEvent,
    SessionAlreadyStarted,
    SessionAlreadyEnded,
    SessionNotYetFinished,

    // Event payload errors
    SerializationFailed,

    // Dispatch errors
    HandlerFailed,
    Timeout,

    // Infrastructure errors
    StorageError,
    NotificationDeliveryFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EventNotFound => "EVENT_NOT_FOUND",
            ErrorCode::DuplicateEvent => "DUPLICATE_EVENT",
            ErrorCode::SessionAlreadyStarted => "SESSION_ALREADY_STARTED",
            ErrorCode::SessionAlreadyEnded => "SESSION_ALREADY_ENDED",
            ErrorCode::SessionNotYetFinished => "SESSION_NOT_YET_FINISHED",
            ErrorCode::SerializationFailed => "SERIALIZATION_FAILED",
            ErrorCode::HandlerFailed => "HANDLER_FAILED",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::NotificationDeliveryFailed => "NOTIFICATION_DELIVERY_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Wraps a payload (de)serialization failure.
    pub fn serialization(err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationFailed,
            format!("Event payload serialization failed: {}", err),
        )
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::EventNotFound, "Event not found");
        assert_eq!(format!("{}", err), "[EVENT_NOT_FOUND] Event not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::StorageError, "Query failed")
            .with_detail("table", "domain_events")
            .with_detail("operation", "select");

        assert_eq!(err.details.get("table"), Some(&"domain_events".to_string()));
        assert_eq!(err.details.get("operation"), Some(&"select".to_string()));
    }

    #[test]
    fn serde_errors_convert_to_serialization_failed() {
        let parse_err = serde_json::from_slice::<serde_json::Value>(b"{not json").unwrap_err();
        let err: DomainError = parse_err.into();
        assert_eq!(err.code, ErrorCode::SerializationFailed);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::HandlerFailed), "HANDLER_FAILED");
        assert_eq!(format!("{}", ErrorCode::NotificationDeliveryFailed), "NOTIFICATION_DELIVERY_FAILED");
    }
}
