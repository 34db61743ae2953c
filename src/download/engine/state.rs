//! Work items and live run counters owned by the engine's control loop.

use crate::download::progress::Progress;

/// One URL and the attempt it is on, tracked until it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    url: String,
    attempt: u32,
}

impl WorkItem {
    /// Creates a work item on its first attempt.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attempt: 1,
        }
    }

    /// The URL to fetch.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The attempt number of the next (or current) fetch, starting at 1.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Moves the item to a later attempt before it is re-queued.
    pub(crate) fn advance_to(&mut self, attempt: u32) {
        debug_assert!(attempt > self.attempt, "attempts only move forward");
        self.attempt = attempt;
    }

    pub(crate) fn into_url(self) -> String {
        self.url
    }
}

/// Live counters for one run.
///
/// Mutated only by the control loop between dispatch and drain, so no
/// synchronization is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    total: usize,
    succeeded: usize,
    failed: Vec<String>,
    in_flight: usize,
    attempts: usize,
    retried: usize,
}

impl RunState {
    /// Creates counters for a run over `total` unique URLs.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Number of unique URLs in the run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// URLs fetched successfully so far.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// URLs recorded as permanently failed so far.
    #[must_use]
    pub fn permanently_failed(&self) -> usize {
        self.failed.len()
    }

    /// URLs not yet settled (pending or in flight).
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total
            .saturating_sub(self.succeeded + self.permanently_failed())
    }

    /// Fetches dispatched whose result has not been drained yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Total fetch attempts dispatched.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Number of times a URL was put back on the queue.
    #[must_use]
    pub fn retried(&self) -> usize {
        self.retried
    }

    /// Current counts as a progress snapshot.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            total: self.total,
            succeeded: self.succeeded,
            remaining: self.remaining(),
            failed: self.permanently_failed(),
        }
    }

    pub(crate) fn record_dispatch(&mut self) {
        self.in_flight += 1;
        self.attempts += 1;
    }

    pub(crate) fn record_success(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.succeeded += 1;
    }

    pub(crate) fn record_retry(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.retried += 1;
    }

    pub(crate) fn record_permanent_failure(&mut self, url: String) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.failed.push(url);
    }

    pub(crate) fn into_report(self) -> RunReport {
        RunReport {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            attempts: self.attempts,
            retried: self.retried,
        }
    }
}

/// Final partition of a run's URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    total: usize,
    succeeded: usize,
    failed: Vec<String>,
    attempts: usize,
    retried: usize,
}

impl RunReport {
    /// Number of unique URLs in the run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// URLs fetched successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Permanently failed URLs, in the order they failed.
    #[must_use]
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// Total fetch attempts made.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Number of requeues after retryable failures.
    #[must_use]
    pub fn retried(&self) -> usize {
        self.retried
    }

    /// Returns true if every URL was fetched.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Consumes the report, returning the permanently failed URLs.
    #[must_use]
    pub fn into_failed(self) -> Vec<String> {
        self.failed
    }
}
