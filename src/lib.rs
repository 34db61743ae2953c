//! Parfetch Core Library
//!
//! This library provides the engine behind the `parfetch` tool, which
//! fetches a list of URLs over HTTP in parallel and writes each payload
//! to a local directory, retrying transient failures.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - Fetch engine, single-resource HTTP fetcher, retry policy
//! - [`parser`] - Newline-delimited URL list parsing

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod parser;
mod user_agent;

// Re-export commonly used types
pub use download::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS, DownloadEngine, EngineError,
    FailureReason, FailureType, FetchConfig, FetchError, Fetcher, HttpClient, NoopProgress,
    Outcome, Progress, ProgressReporter, RetryDecision, RetryPolicy, RunReport, RunState,
    WorkItem, classify_failure, run_urls,
};
pub use parser::{InputError, parse_url_list, read_url_list};
