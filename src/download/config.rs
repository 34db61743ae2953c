//! Run configuration for the fetch engine.

use std::time::Duration;

use super::constants::{DEFAULT_CONCURRENCY, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS};
use super::engine::EngineError;

/// Settings for one fetch run.
///
/// # Default Values
///
/// - `max_attempts`: 5
/// - `max_concurrency`: 8
/// - `timeout`: 30 seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Maximum tries per URL before it is recorded as permanently failed.
    pub max_attempts: u32,
    /// Maximum number of simultaneous fetches.
    pub max_concurrency: usize,
    /// Per-fetch network timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchConfig {
    /// Creates a config with explicit attempt and concurrency limits and the default timeout.
    #[must_use]
    pub fn new(max_attempts: u32, max_concurrency: usize) -> Self {
        Self {
            max_attempts,
            max_concurrency,
            ..Self::default()
        }
    }

    /// Returns a copy with a different per-fetch timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks the preconditions the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `max_attempts` is zero,
    /// `max_concurrency` is zero, or the timeout is zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_attempts == 0 {
            return Err(EngineError::invalid_config(
                "max_attempts",
                self.max_attempts,
                "must be at least 1",
            ));
        }
        if self.max_concurrency == 0 {
            return Err(EngineError::invalid_config(
                "max_concurrency",
                self.max_concurrency,
                "must be at least 1",
            ));
        }
        if self.timeout.is_zero() {
            return Err(EngineError::invalid_config(
                "timeout",
                "0s",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
