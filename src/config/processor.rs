//! Event processor configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POLL_INTERVAL_MS: u64 = 60 * 60 * 1000;
const MAX_BATCH_SIZE: usize = 10_000;
const MAX_HANDLER_TIMEOUT_SECS: u64 = 600;

/// Poll loop tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    /// Milliseconds between polls of the event store
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum events fetched per poll
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Seconds allowed for all handlers of one event
    #[serde(default = "default_handler_timeout_secs")]
    pub handler_timeout_secs: u64,
}

impl ProcessorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }

    /// Validate processor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ValidationError::InvalidPollInterval);
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ValidationError::InvalidBatchSize);
        }
        if self.handler_timeout_secs == 0 || self.handler_timeout_secs > MAX_HANDLER_TIMEOUT_SECS {
            return Err(ValidationError::InvalidHandlerTimeout);
        }
        Ok(())
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            batch_size: default_batch_size(),
            handler_timeout_secs: default_handler_timeout_secs(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    10_000
}

fn default_batch_size() -> usize {
    100
}

fn default_handler_timeout_secs() -> u64 {
    30
}
