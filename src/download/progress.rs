//! Progress reporting hook for fetch runs.

/// Counts observed after a drain: how many URLs succeeded, are still
/// pending or in flight, and have permanently failed.
///
/// `succeeded + remaining + failed == total` for every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of unique URLs in the run.
    pub total: usize,
    /// URLs fetched successfully.
    pub succeeded: usize,
    /// URLs not yet settled.
    pub remaining: usize,
    /// URLs recorded as permanently failed.
    pub failed: usize,
}

impl Progress {
    /// Returns true once every URL has settled.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }
}

/// Receives progress snapshots from the engine's control loop.
///
/// Called on the control loop itself, so implementations should be quick.
/// Any `FnMut(Progress)` closure is a reporter.
pub trait ProgressReporter {
    /// Called after every completed fetch has been classified.
    fn on_progress(&mut self, progress: Progress);

    /// Called once when the run is over.
    fn on_finish(&mut self, _progress: Progress) {}
}

impl<F> ProgressReporter for F
where
    F: FnMut(Progress),
{
    fn on_progress(&mut self, progress: Progress) {
        self(progress);
    }
}

/// Reporter that ignores all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn on_progress(&mut self, _progress: Progress) {}
}
