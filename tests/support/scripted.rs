//! In-memory fetchers with scripted outcomes for scheduling tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parfetch_core::{Fetcher, Outcome};

/// Fetcher that replays per-URL outcome scripts and records every call.
///
/// Once a URL's script is exhausted (or if it has none) the fallback
/// outcome is returned. Tracks how many fetches overlap.
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<Outcome>>>,
    fallback: Outcome,
    delay: Duration,
    calls: Mutex<Vec<String>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedFetcher {
    /// Every fetch returns `fallback` unless scripted otherwise.
    pub fn with_fallback(fallback: Outcome) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback,
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Every fetch succeeds unless scripted otherwise.
    pub fn succeeding() -> Self {
        Self::with_fallback(Outcome::Success)
    }

    /// Queues outcomes for successive fetches of `url`.
    pub fn script(self, url: &str, outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), outcomes.into_iter().collect());
        self
    }

    /// Makes every fetch take `delay` before returning.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// URLs in the order they were fetched.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `url` was fetched.
    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    /// Highest number of fetches observed running at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, _output_dir: &Path) -> Outcome {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(url.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front);
        self.active.fetch_sub(1, Ordering::SeqCst);
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Fetcher that panics on every call.
#[derive(Default)]
pub struct PanickingFetcher {
    calls: AtomicUsize,
}

impl PanickingFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for PanickingFetcher {
    async fn fetch(&self, url: &str, _output_dir: &Path) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("scripted panic for {url}");
    }
}
