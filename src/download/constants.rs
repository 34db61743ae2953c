//! Constants for the download module (timeouts and defaults).

/// Per-fetch HTTP timeout covering connect, request and body (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of attempts per URL, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default number of simultaneous fetches.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Extension used when a URL has no path segment to name the file after.
pub(crate) const FALLBACK_EXTENSION: &str = "html";
