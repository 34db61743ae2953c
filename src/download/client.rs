//! HTTP client wrapper for fetching single resources.
//!
//! This module provides the `HttpClient` struct which performs one GET per
//! call with a hard timeout and streams the body to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::DEFAULT_TIMEOUT_SECS;
use super::error::FetchError;
use super::fetcher::Fetcher;
use super::filename::filename_from_url;
use super::outcome::{FailureReason, Outcome};
use crate::user_agent;

/// HTTP client for fetching resources to disk.
///
/// Created once and shared by all fetch workers, taking advantage of
/// connection pooling. Cloning is cheap.
///
/// # Example
///
/// ```no_run
/// use parfetch_core::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let path = client.download_to_file("https://example.com/file.png", Path::new("./downloads")).await?;
/// println!("Downloaded to: {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default 30 second timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client whose requests fail after `timeout`.
    ///
    /// The timeout covers the whole exchange: connect, request and body.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent::default_fetch_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Fetches a URL and writes the payload to `output_dir`.
    ///
    /// Only status 200 counts as success. The filename comes from the
    /// URL's last path segment, or `{host}.html` when there is none, and
    /// is only derived once the response is known to be good. An existing
    /// file with the same name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if:
    /// - The URL is invalid
    /// - The request fails or times out
    /// - The server answers with any status other than 200
    /// - Writing to disk fails
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download_to_file(
        &self,
        url: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let parsed_url =
            Url::parse(url).map_err(|e| FetchError::invalid_url(url, e.to_string()))?;

        let response = self
            .client
            .get(parsed_url.clone())
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status().as_u16();
        if status != 200 {
            debug!(status, "non-200 response");
            return Err(FetchError::http_status(url, status));
        }

        let file_path = output_dir.join(filename_from_url(&parsed_url));
        let file = File::create(&file_path)
            .await
            .map_err(|e| FetchError::io(file_path.clone(), e))?;

        let stream_result = stream_to_file(file, response, url, &file_path).await;
        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }
        let bytes = stream_result?;

        debug!(path = %file_path.display(), bytes, "download complete");
        Ok(file_path)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str, output_dir: &Path) -> Outcome {
        match self.download_to_file(url, output_dir).await {
            Ok(_) => Outcome::Success,
            Err(error) => {
                debug!(url = %url, error = %error, "fetch attempt failed");
                Outcome::Failure(FailureReason::from(error))
            }
        }
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, FetchError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| FetchError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| FetchError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_invalid_url_is_transport_failure() {
        let client = HttpClient::new();
        let temp_dir = TempDir::new().unwrap();

        let outcome = client.fetch("not-a-valid-url", temp_dir.path()).await;

        match outcome {
            Outcome::Failure(FailureReason::Transport(message)) => {
                assert!(message.contains("invalid URL"), "message: {message}");
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_download_to_file_invalid_url_error() {
        let client = HttpClient::new();
        let temp_dir = TempDir::new().unwrap();

        let result = client.download_to_file("::nope::", temp_dir.path()).await;

        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_invalid_url_writes_nothing() {
        let client = HttpClient::new();
        let temp_dir = TempDir::new().unwrap();

        let _ = client.fetch("not-a-valid-url", temp_dir.path()).await;

        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_with_timeout_builds_client() {
        assert!(HttpClient::with_timeout(Duration::from_millis(250)).is_ok());
    }
}
