//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`ProgressCallback`] trait the grouping engine
//! reports through, and the [`Progress`] implementation that renders a
//! textual bar in the terminal.
//!
//! The progress bar is a scoped terminal resource: it is created when the
//! scan starts and finished (cursor state restored by indicatif) when the
//! scan ends, rather than leaving ambient console state behind.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the scanning phase.
///
/// Implement this trait to receive `(processed, total)` updates while the
/// grouping engine fingerprints files. The engine guarantees `processed`
/// is monotonically non-decreasing, `total` is constant for one scan, and
/// the final call satisfies `processed == total`.
pub trait ProgressCallback {
    /// Called once before hashing begins, with the total file count.
    fn on_scan_start(&self, total: usize);

    /// Called after each file is processed.
    fn on_progress(&self, processed: usize, total: usize);

    /// Called when a file is skipped due to a read failure.
    ///
    /// The message names the affected path and cause.
    fn on_file_error(&self, _message: &str) {}

    /// Called once when the scan completes.
    fn on_scan_end(&self);
}

/// Progress reporter rendering an indicatif bar.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bar is displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:50.cyan/blue}] {pos}/{len} ({percent}%)",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self, total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_progress(&self, processed: usize, _total: usize) {
        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.set_position(processed as u64);
        }
    }

    fn on_file_error(&self, message: &str) {
        // Print above the bar so the diagnostic is not overwritten
        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.println(format!("Warning: {}", message));
        } else {
            eprintln!("Warning: {}", message);
        }
    }

    fn on_scan_end(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message("Scan complete");
        }
    }
}
