//! URL list parsing.
//!
//! Input is a newline-delimited list of URLs. Each line is trimmed, empty
//! lines are dropped and duplicates are removed while keeping the order of
//! first occurrence.
//!
//! # Example
//!
//! ```
//! use parfetch_core::parser::parse_url_list;
//!
//! let urls = parse_url_list("https://a.example/1.png\n\n  https://a.example/1.png  \nhttps://b.example/\n");
//! assert_eq!(urls, ["https://a.example/1.png", "https://b.example/"]);
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while loading a URL list.
#[derive(Debug, Error)]
pub enum InputError {
    /// The list file could not be read.
    #[error("failed to read URL list {path}: {source}")]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Parses newline-delimited text into a deduplicated URL list.
///
/// No URL validation happens here: malformed entries are kept and fail
/// at fetch time like any other unreachable URL.
#[must_use]
pub fn parse_url_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

/// Reads and parses a URL list file.
///
/// # Errors
///
/// Returns [`InputError::Read`] if the file cannot be read as UTF-8 text.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn read_url_list(path: &Path) -> Result<Vec<String>, InputError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let urls = parse_url_list(&text);
    debug!(lines = text.lines().count(), urls = urls.len(), "parsed URL list");
    Ok(urls)
}
