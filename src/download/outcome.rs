//! Result of a single fetch attempt.

use std::fmt;

/// Outcome of one fetch attempt, as returned by a [`Fetcher`](super::Fetcher).
///
/// Fetchers never return `Err`; every failure mode is captured here as data
/// so the engine can classify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The payload was retrieved and written to disk.
    Success,

    /// The attempt failed for the given reason.
    Failure(FailureReason),
}

impl Outcome {
    /// Creates a failure for a completed exchange with a non-200 status.
    #[must_use]
    pub fn http_status(status: u16) -> Self {
        Self::Failure(FailureReason::HttpStatus(status))
    }

    /// Creates a failure for an exchange that never completed.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Failure(FailureReason::Transport(message.into()))
    }

    /// Returns true if the attempt succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Success => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

/// Why a fetch attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The HTTP exchange completed but the server answered with this status.
    HttpStatus(u16),

    /// The exchange never produced a usable response (connection refused,
    /// DNS failure, timeout, malformed URL or response, local write error).
    Transport(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpStatus(status) => write!(f, "HTTP {status}"),
            Self::Transport(message) => f.write_str(message),
        }
    }
}
