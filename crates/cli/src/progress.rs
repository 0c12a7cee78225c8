//! Progress indicators
//!
//! Provides progress bars for batch runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress bar for answer files
///
/// Hidden when `hidden` is set, so JSON output stays clean.
pub fn file_progress(total: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} answers ({eta}) {msg}")
            .expect("progress template is valid")
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Finish a progress bar with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {}", message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_progress_creation() {
        let pb = file_progress(10, false);
        pb.inc(5);
        finish_success(&pb, "done");
    }

    #[test]
    fn test_hidden_progress() {
        let pb = file_progress(10, true);
        assert!(pb.is_hidden());
        finish_error(&pb, "failed");
    }
}
