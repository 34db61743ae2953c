//! Live progress line for fetch runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use parfetch_core::{Progress, ProgressReporter};

/// Single-line spinner showing downloaded / remaining / failed counts.
///
/// Hidden in quiet mode; the engine still drives it so the code path is
/// the same either way.
pub(crate) struct ProgressLine {
    bar: ProgressBar,
}

impl ProgressLine {
    pub(crate) fn new(total: usize, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        bar.set_message(format_progress(&Progress {
            total,
            succeeded: 0,
            remaining: total,
            failed: 0,
        }));
        Self { bar }
    }
}

impl ProgressReporter for ProgressLine {
    fn on_progress(&mut self, progress: Progress) {
        self.bar.set_message(format_progress(&progress));
    }

    fn on_finish(&mut self, progress: Progress) {
        self.bar.finish_with_message(format_progress(&progress));
    }
}

pub(crate) fn format_progress(progress: &Progress) -> String {
    format!(
        "Downloaded: {}/{} | Remaining: {} | Failed: {}",
        progress.succeeded, progress.total, progress.remaining, progress.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progress_line() {
        let line = format_progress(&Progress {
            total: 10,
            succeeded: 6,
            remaining: 3,
            failed: 1,
        });
        assert_eq!(line, "Downloaded: 6/10 | Remaining: 3 | Failed: 1");
    }

    #[test]
    fn test_hidden_progress_line_accepts_updates() {
        let mut line = ProgressLine::new(2, true);
        let done = Progress {
            total: 2,
            succeeded: 2,
            remaining: 0,
            failed: 0,
        };
        line.on_progress(done);
        line.on_finish(done);
        assert_eq!(
            line.bar.message(),
            "Downloaded: 2/2 | Remaining: 0 | Failed: 0"
        );
    }
}
