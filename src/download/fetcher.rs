//! The single-resource fetch seam used by the engine.

use std::path::Path;

use async_trait::async_trait;

use super::outcome::Outcome;

/// Performs one fetch of one URL into a directory.
///
/// Implementations hold no per-run state and know nothing about attempts
/// or retries. They must not panic and never return an error: every
/// failure is reported as [`Outcome::Failure`].
///
/// `async_trait` keeps the trait object-safe so the engine can also be
/// driven through `Arc<dyn Fetcher>`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and, on success, writes the payload under `output_dir`.
    async fn fetch(&self, url: &str, output_dir: &Path) -> Outcome;
}
