use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} URLs checked ({eta})";

/// Progress bar on stderr for runs whose stdout carries JSON only.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    #[cfg(test)]
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start(&mut self, total_urls: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::with_draw_target(Some(total_urls as u64), ProgressDrawTarget::stderr());
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(pb);
    }

    /// Count one more finished URL
    pub fn advance(&self) {
        if let Some(ref pb) = self.bar {
            pb.inc(1);
        }
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Remove the bar so nothing lingers on the terminal after the run
    pub fn finish(&self) {
        if let Some(ref pb) = self.bar {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_is_inert() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start(10);
        reporter.advance();
        reporter.finish();

        assert!(!reporter.is_enabled());
        assert_eq!(reporter.position(), 0);
    }

    #[test]
    fn test_enabled_reporter_counts() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start(3);
        reporter.advance();
        reporter.advance();

        assert_eq!(reporter.position(), 2);
        reporter.finish();
    }
}
