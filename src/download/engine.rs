//! Fetch engine: bounded-concurrency scheduling with selective retry.
//!
//! This module provides the `DownloadEngine` which drives a list of URLs to
//! a final success/failure partition.
//!
//! # Pipeline
//!
//! ```text
//! pending queue ──▶ work channel ──▶ N fetch workers ──▶ result channel ──▶ control loop
//!      ▲                                                                    │
//!      └──────────────────────── retryable failure ─────────────────────────┘
//! ```
//!
//! The control loop is the only writer of the pending queue and
//! [`RunState`]. It dispatches items while fewer than `max_concurrency`
//! are in flight, then sleeps on the result channel until a worker
//! finishes. Retried items go to the back of the queue, so dispatch order
//! is FIFO and nothing starves.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let urls = vec!["https://example.com/a.png".to_string()];
//! let failed = parfetch_core::run_urls(urls, Path::new("./downloads"), 5, 8).await?;
//! println!("{} URLs failed", failed.len());
//! # Ok(())
//! # }
//! ```

mod state;
mod worker;

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, instrument, warn};

pub use state::{RunReport, RunState, WorkItem};

use super::client::HttpClient;
use super::config::FetchConfig;
use super::fetcher::Fetcher;
use super::outcome::Outcome;
use super::progress::{NoopProgress, ProgressReporter};
use super::retry::{RetryDecision, RetryPolicy};
use worker::Completion;

/// Error type for download engine operations.
///
/// Individual URL failures never surface here; they end up in
/// [`RunReport::failed`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration value violates the engine's preconditions.
    #[error("invalid {field} value {value}: {reason}")]
    InvalidConfig {
        /// The offending setting.
        field: &'static str,
        /// The rejected value, rendered.
        value: String,
        /// What the value must satisfy.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// All fetch workers exited while work was still outstanding.
    #[error("fetch workers exited with work still in flight")]
    WorkersGone,
}

impl EngineError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(
        field: &'static str,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Fetch engine with a fixed worker budget and retry policy.
///
/// # Concurrency Model
///
/// - `min(max_concurrency, total)` worker tasks are spawned per run
/// - Workers pull from a bounded work channel and push results to a
///   result channel; they never touch run state
/// - The control loop caps in-flight items at `max_concurrency`
///
/// # Retry Behavior
///
/// - Transport errors, 5xx, 408 and 429 go back on the queue while
///   attempts remain
/// - Every other status fails the URL immediately
#[derive(Debug, Clone)]
pub struct DownloadEngine {
    config: FetchConfig,
    retry_policy: RetryPolicy,
}

impl DownloadEngine {
    /// Creates a new engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `max_attempts` is zero or
    /// `max_concurrency` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use parfetch_core::download::{DownloadEngine, FetchConfig};
    ///
    /// let engine = DownloadEngine::new(FetchConfig::new(5, 8)).unwrap();
    /// assert_eq!(engine.concurrency(), 8);
    /// ```
    #[instrument(level = "debug")]
    pub fn new(config: FetchConfig) -> Result<Self, EngineError> {
        config.validate()?;

        debug!(
            max_attempts = config.max_attempts,
            concurrency = config.max_concurrency,
            timeout_ms = config.timeout.as_millis(),
            "creating download engine"
        );

        Ok(Self {
            config,
            retry_policy: RetryPolicy::new(config.max_attempts),
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.config.max_concurrency
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches every URL and returns the final partition.
    ///
    /// Duplicate URLs are collapsed (first occurrence kept) before the run
    /// starts, so each URL is counted and reported at most once.
    /// `output_dir` must already exist. `reporter` sees a snapshot after
    /// every completed fetch and once more at the end.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkersGone`] if the worker pool disappears
    /// with work outstanding. Individual fetch failures do NOT cause this
    /// method to error.
    #[instrument(skip_all, fields(output_dir = %output_dir.display()))]
    pub async fn run<F, R>(
        &self,
        urls: impl IntoIterator<Item = String>,
        fetcher: Arc<F>,
        output_dir: &Path,
        reporter: &mut R,
    ) -> Result<RunReport, EngineError>
    where
        F: Fetcher + ?Sized + 'static,
        R: ProgressReporter + ?Sized,
    {
        let mut pending = unique_work_items(urls);
        let mut state = RunState::new(pending.len());
        let max_in_flight = self.config.max_concurrency;

        info!(
            total = state.total(),
            concurrency = max_in_flight,
            max_attempts = self.retry_policy.max_attempts(),
            "starting fetch run"
        );

        if pending.is_empty() {
            reporter.on_finish(state.progress());
            return Ok(state.into_report());
        }

        // No more than one worker per unique URL, however high the cap.
        let pool_size = max_in_flight.min(pending.len());
        let (work_tx, work_rx) = mpsc::channel::<WorkItem>(pool_size);
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Completion>();
        let workers = worker::spawn_workers(
            pool_size,
            &fetcher,
            output_dir,
            &Arc::new(Mutex::new(work_rx)),
            &result_tx,
        );
        // Only workers hold senders now, so a dead pool closes the channel.
        drop(result_tx);

        loop {
            while state.in_flight() < max_in_flight
                && let Some(item) = pending.pop_front()
            {
                debug!(url = %item.url(), attempt = item.attempt(), "dispatching");
                state.record_dispatch();
                if work_tx.send(item).await.is_err() {
                    error!("work channel closed while dispatching");
                    return Err(EngineError::WorkersGone);
                }
            }

            if state.in_flight() == 0 {
                break;
            }

            let Some(Completion { item, outcome }) = result_rx.recv().await else {
                error!(
                    in_flight = state.in_flight(),
                    pending = pending.len(),
                    "all fetch workers exited with work outstanding"
                );
                return Err(EngineError::WorkersGone);
            };

            self.settle(&mut state, &mut pending, item, outcome);
            reporter.on_progress(state.progress());
        }

        drop(work_tx);
        for handle in workers {
            if let Err(e) = handle.await {
                warn!(error = %e, "fetch worker panicked");
            }
        }

        let final_progress = state.progress();
        info!(
            succeeded = state.succeeded(),
            failed = state.permanently_failed(),
            attempts = state.attempts(),
            retried = state.retried(),
            total = state.total(),
            "fetch run complete"
        );
        reporter.on_finish(final_progress);

        Ok(state.into_report())
    }

    /// Classifies one completed fetch: count it, requeue it, or fail it.
    fn settle(
        &self,
        state: &mut RunState,
        pending: &mut VecDeque<WorkItem>,
        mut item: WorkItem,
        outcome: Outcome,
    ) {
        let reason = match outcome {
            Outcome::Success => {
                debug!(url = %item.url(), attempt = item.attempt(), "fetch succeeded");
                state.record_success();
                return;
            }
            Outcome::Failure(reason) => reason,
        };

        match self.retry_policy.should_retry(&reason, item.attempt()) {
            RetryDecision::Retry { attempt } => {
                debug!(
                    url = %item.url(),
                    failure = %reason,
                    next_attempt = attempt,
                    "requeueing after retryable failure"
                );
                item.advance_to(attempt);
                state.record_retry();
                pending.push_back(item);
            }
            RetryDecision::DoNotRetry { reason: why } => {
                info!(
                    url = %item.url(),
                    failure = %reason,
                    attempts = item.attempt(),
                    why = %why,
                    "permanently failed"
                );
                state.record_permanent_failure(item.into_url());
            }
        }
    }
}

/// Fetches `urls` into `output_dir` over HTTP and returns the permanently
/// failed URLs in the order they failed.
///
/// Convenience wrapper that builds an [`HttpClient`] and a
/// [`DownloadEngine`] with the default timeout and reports no progress.
/// `output_dir` must already exist.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfig`] for `max_attempts == 0` or
/// `max_concurrency == 0`, and [`EngineError::ClientBuild`] if
/// the HTTP client cannot be created.
pub async fn run_urls(
    urls: Vec<String>,
    output_dir: &Path,
    max_attempts: u32,
    max_concurrency: usize,
) -> Result<Vec<String>, EngineError> {
    let config = FetchConfig::new(max_attempts, max_concurrency);
    let engine = DownloadEngine::new(config)?;
    let client = HttpClient::with_timeout(config.timeout).map_err(EngineError::ClientBuild)?;
    let report = engine
        .run(urls, Arc::new(client), output_dir, &mut NoopProgress)
        .await?;
    Ok(report.into_failed())
}

fn unique_work_items(urls: impl IntoIterator<Item = String>) -> VecDeque<WorkItem> {
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    let items: VecDeque<WorkItem> = urls
        .into_iter()
        .filter(|url| {
            let fresh = seen.insert(url.clone());
            if !fresh {
                duplicates += 1;
            }
            fresh
        })
        .map(WorkItem::new)
        .collect();
    if duplicates > 0 {
        debug!(duplicates, "dropped duplicate URLs");
    }
    items
}
