//! Retry classification for failed fetch attempts.
//!
//! This module provides the [`RetryPolicy`] and [`FailureType`] types for
//! classifying fetch failures and deciding whether a URL goes back on the
//! queue.
//!
//! # Overview
//!
//! When a fetch fails, its [`FailureReason`] is classified into a [`FailureType`]:
//! - [`FailureType::Transient`] - Temporary failures that may succeed on retry
//! - [`FailureType::RateLimited`] - Server rate limiting (HTTP 429)
//! - [`FailureType::Permanent`] - Failures that won't succeed regardless of retries
//!
//! The [`RetryPolicy`] then decides based on failure type and attempt count.
//! Retried URLs go to the back of the pending queue; there is no backoff
//! delay, the queue order itself spaces attempts out.
//!
//! # Example
//!
//! ```
//! use parfetch_core::download::{FailureReason, RetryDecision, RetryPolicy};
//!
//! let policy = RetryPolicy::new(5);
//! match policy.should_retry(&FailureReason::HttpStatus(503), 1) {
//!     RetryDecision::Retry { attempt } => println!("requeue as attempt {attempt}"),
//!     RetryDecision::DoNotRetry { reason } => println!("giving up: {reason}"),
//! }
//! ```

use tracing::{debug, instrument};

use super::constants::DEFAULT_MAX_ATTEMPTS;
use super::outcome::FailureReason;

/// Classification of fetch failure types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Temporary failure that may succeed on retry.
    ///
    /// Examples: any transport error, 5xx server errors, 408.
    Transient,

    /// Server rate limiting (HTTP 429).
    RateLimited,

    /// Failure that won't succeed regardless of retries.
    ///
    /// Examples: 404 Not Found, 403 Forbidden, 410 Gone.
    Permanent,
}

impl FailureType {
    /// Returns true if failures of this type are eligible for another attempt.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::Permanent)
    }
}

/// Decision on whether to retry a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Put the URL back on the queue.
    Retry {
        /// Which attempt number the next try will be (first retry is attempt 2).
        attempt: u32,
    },

    /// Record the URL as permanently failed.
    DoNotRetry {
        /// Human-readable reason why retry is not attempted.
        reason: String,
    },
}

/// Retry configuration: how many attempts a URL gets in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy allowing `max_attempts` tries per URL (clamped to at least 1).
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Determines whether to retry a failed fetch.
    ///
    /// # Arguments
    ///
    /// * `reason` - Why the attempt failed
    /// * `attempt` - The attempt number that just failed (1-indexed)
    #[instrument(level = "trace", skip(self), fields(max_attempts = self.max_attempts))]
    pub fn should_retry(&self, reason: &FailureReason, attempt: u32) -> RetryDecision {
        if !classify_failure(reason).is_retryable() {
            return RetryDecision::DoNotRetry {
                reason: format!("{reason} is permanent - retry would not help"),
            };
        }

        if attempt >= self.max_attempts {
            debug!(attempt, max = self.max_attempts, "max attempts reached");
            return RetryDecision::DoNotRetry {
                reason: format!("max attempts ({}) exhausted", self.max_attempts),
            };
        }

        RetryDecision::Retry {
            attempt: attempt + 1,
        }
    }
}

/// Classifies a failure reason for retry decisions.
///
/// # HTTP Status Code Classification
///
/// | Status | Type | Rationale |
/// |--------|------|-----------|
/// | 408 | Transient | Request timeout - may succeed |
/// | 429 | RateLimited | Rate limited - later attempt may pass |
/// | 5xx | Transient | Server error - may be temporary |
/// | anything else | Permanent | Client error or unexpected status |
///
/// # Transport Errors
///
/// Every transport error is transient, including ones that look
/// non-transient such as a malformed URL. Losing a download is worse than
/// spending a few attempts on it.
#[must_use]
pub fn classify_failure(reason: &FailureReason) -> FailureType {
    match reason {
        FailureReason::Transport(_) => FailureType::Transient,
        FailureReason::HttpStatus(status) => classify_http_status(*status),
    }
}

#[allow(clippy::match_same_arms)]
fn classify_http_status(status: u16) -> FailureType {
    match status {
        408 => FailureType::Transient,
        429 => FailureType::RateLimited,
        500..=599 => FailureType::Transient,
        _ => FailureType::Permanent,
    }
}
