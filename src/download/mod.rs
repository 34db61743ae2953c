//! Parallel fetch engine with bounded concurrency and selective retry.
//!
//! This module provides the pieces that turn a list of URLs into files on
//! disk:
//!
//! - [`HttpClient`] performs one GET per call and writes the payload
//! - [`DownloadEngine`] schedules fetches over a fixed worker pool,
//!   requeues retryable failures and partitions the input into
//!   successes and permanent failures
//! - [`RetryPolicy`] and [`classify_failure`] decide which failures are
//!   worth another attempt
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use parfetch_core::download::{DownloadEngine, FetchConfig, HttpClient, NoopProgress};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetchConfig::default();
//! let engine = DownloadEngine::new(config)?;
//! let client = Arc::new(HttpClient::with_timeout(config.timeout)?);
//! let urls = vec!["https://example.com/image.png".to_string()];
//! let report = engine
//!     .run(urls, client, Path::new("./downloads"), &mut NoopProgress)
//!     .await?;
//! for url in report.failed() {
//!     println!("failed: {url}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod constants;
mod engine;
mod error;
mod fetcher;
mod filename;
mod outcome;
mod progress;
mod retry;

pub use client::HttpClient;
pub use config::FetchConfig;
pub use constants::{DEFAULT_CONCURRENCY, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS};
pub use engine::{DownloadEngine, EngineError, RunReport, RunState, WorkItem, run_urls};
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use outcome::{FailureReason, Outcome};
pub use progress::{NoopProgress, Progress, ProgressReporter};
pub use retry::{FailureType, RetryDecision, RetryPolicy, classify_failure};
