//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Poll interval must be between 1ms and 1 hour")]
    InvalidPollInterval,

    #[error("Batch size must be between 1 and 10000")]
    InvalidBatchSize,

    #[error("Handler timeout must be between 1 and 600 seconds")]
    InvalidHandlerTimeout,

    #[error("Invalid operator organization id: {0}")]
    InvalidOrganizationId(String),
}
