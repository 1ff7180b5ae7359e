//! Progress reporting for long-running analysis batches.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A per-URL progress bar ticked once per terminal outcome. Retries are
/// silent, so they don't advance the bar.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    pub fn start(&mut self, total_urls: usize) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total_urls as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} URLs analyzed ({eta})",
                )
                .expect("static progress template")
                .progress_chars("#>-"),
        );
        bar.set_message("Analyzing URLs");
        bar.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(bar);
    }

    /// Records one finished URL (successful or not).
    pub fn url_done(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    pub fn finish(&self, success_count: usize, total_count: usize) {
        if let Some(ref bar) = self.bar {
            let message = if success_count == total_count {
                "✓ All URLs analyzed".to_string()
            } else {
                format!("✓ Analysis complete ({success_count}/{total_count} successful)")
            };
            bar.finish_with_message(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_disabled_is_inert() {
        let mut reporter = ProgressReporter::new(false);

        // These should not panic even when disabled.
        reporter.start(10);
        assert!(reporter.bar.is_none());
        reporter.url_done();
        reporter.finish(9, 10);
    }

    #[test]
    fn test_progress_reporter_enabled() {
        let mut reporter = ProgressReporter::new(true);

        reporter.start(3);
        assert!(reporter.bar.is_some());
        reporter.url_done();
        reporter.url_done();
        reporter.finish(2, 3);
    }

    #[test]
    fn test_progress_reporter_zero_urls() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start(0);
        reporter.finish(0, 0);
    }
}
