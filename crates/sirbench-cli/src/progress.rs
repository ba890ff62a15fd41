//! Progress bar for benchmark steps.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use sirbench_orchestration::interfaces::{BenchmarkProgress, ProgressReporter};

const TEMPLATE: &str = "{spinner:.cyan} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// Progress reporter drawing to stderr; hidden in quiet mode.
pub struct CLIProgressReporter {
    bar: ProgressBar,
}

impl CLIProgressReporter {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        };
        Self { bar }
    }

    /// Whether the bar draws anywhere.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }
}

impl ProgressReporter for CLIProgressReporter {
    fn report(&self, progress: &BenchmarkProgress) {
        self.bar.set_length(progress.total as u64);
        self.bar.set_position(progress.current.saturating_sub(1) as u64);
        self.bar.set_message(progress.step.clone());
        tracing::debug!(step = %progress.step, current = progress.current, total = progress.total, "benchmark step");
    }

    fn complete(&self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
        self.bar.finish_and_clear();
    }
}
