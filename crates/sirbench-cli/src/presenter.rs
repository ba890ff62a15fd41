//! CLI result presenter.

use sirbench_orchestration::interfaces::{BenchmarkReport, ResultPresenter};

use crate::output::{format_number, format_table_header, format_table_row};
use crate::ui;

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_header(&self, trials: u64, thread_counts: &[usize]) {
        if self.quiet {
            return;
        }
        ui::print_header("Parallel SIR Monte Carlo benchmark");
        println!("Total simulations: {}", format_number(trials));
        println!("Thread counts: {thread_counts:?}");
        println!("{}", "=".repeat(70));
    }

    fn present_baseline(&self, baseline_ms: f64) {
        if self.quiet {
            return;
        }
        println!("Sequential time: {baseline_ms:.2} ms\n");
    }

    fn present_report(&self, report: &BenchmarkReport) {
        if self.quiet {
            for row in &report.rows {
                println!("{}", format_table_row(row));
            }
            return;
        }

        println!("{}", format_table_header());
        println!("{}", "-".repeat(70));
        for row in &report.rows {
            println!("{}", format_table_row(row));
        }
        for row in &report.rows {
            if let Some(warning) = &row.warning {
                ui::print_warning(&format!("{} threads: {warning}", row.threads));
            }
        }

        if self.verbose {
            println!();
            println!("Split threshold: {}", format_number(report.threshold));
            println!(
                "Baseline mean duration: {:.3} days, mean peak: {:.3}",
                report.baseline_stats.mean_duration(report.trials),
                report.baseline_stats.mean_peak(report.trials),
            );
            if let Some(best) = report.best_executor() {
                println!(
                    "Best partitioned pool: {:.2}x with {} threads",
                    best.executor_speedup, best.threads
                );
            }
            if let Some(best) = report.best_fork_join() {
                println!(
                    "Best recursive split: {:.2}x with {} threads",
                    best.fork_join_speedup, best.threads
                );
            }
        }
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}
