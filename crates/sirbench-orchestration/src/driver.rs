//! Benchmark driver: sequential baseline plus both schedulers per thread count.

use std::time::Duration;

use anyhow::{Context, Result};

use sirbench_core::constants::DEFAULT_THREAD_COUNTS;
use sirbench_core::error::require_positive;
use sirbench_core::{ModelParams, SimError};

use crate::interfaces::{
    BenchmarkProgress, BenchmarkReport, BenchmarkRow, ProgressReporter, Strategy,
};
use crate::orchestrator::{analyze_comparison_results, execute_strategy};

/// Parse thread counts from command-line words, sorted and deduplicated.
///
/// An empty list yields the defaults.
pub fn parse_thread_counts<S: AsRef<str>>(args: &[S]) -> Result<Vec<usize>, SimError> {
    if args.is_empty() {
        return Ok(DEFAULT_THREAD_COUNTS.to_vec());
    }
    let mut counts = args
        .iter()
        .map(|a| {
            let a = a.as_ref();
            match a.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(SimError::InvalidConfiguration(format!(
                    "invalid thread count: {a:?}"
                ))),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    counts.sort_unstable();
    counts.dedup();
    Ok(counts)
}

/// Speedup of `elapsed` relative to `baseline`.
#[must_use]
pub fn speedup(baseline_ms: f64, elapsed_ms: f64) -> f64 {
    if elapsed_ms > 0.0 {
        baseline_ms / elapsed_ms
    } else {
        1.0
    }
}

/// Parallel efficiency in percent.
#[must_use]
pub fn efficiency(speedup: f64, threads: usize) -> f64 {
    speedup / threads as f64 * 100.0
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// What to benchmark.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Trials per strategy execution.
    pub trials: u64,
    /// Thread counts, ascending.
    pub thread_counts: Vec<usize>,
    /// Split threshold for the recursive scheduler.
    pub threshold: u64,
    /// Model parameters.
    pub params: ModelParams,
}

impl BenchmarkConfig {
    /// Reject anything that would fail once scheduling starts.
    pub fn validate(&self) -> Result<(), SimError> {
        require_positive(self.trials, "trial count")?;
        require_positive(self.threshold, "split threshold")?;
        if self.thread_counts.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "at least one thread count is required".into(),
            ));
        }
        for &threads in &self.thread_counts {
            require_positive(threads as u64, "thread count")?;
        }
        self.params.validate()
    }
}

/// Runs the baseline and both schedulers for every thread count.
pub struct BenchmarkDriver<'a> {
    config: BenchmarkConfig,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> BenchmarkDriver<'a> {
    #[must_use]
    pub fn new(config: BenchmarkConfig, reporter: &'a dyn ProgressReporter) -> Self {
        Self { config, reporter }
    }

    #[must_use]
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run the whole benchmark.
    ///
    /// Any strategy failure aborts the run; a drift in means between
    /// strategies is only recorded as a row warning.
    pub fn run(&self) -> Result<BenchmarkReport> {
        let cfg = &self.config;
        cfg.validate()?;

        let total = 1 + cfg.thread_counts.len() * 2;
        let mut step = 0;
        let mut report_step = |label: String| {
            step += 1;
            self.reporter.report(&BenchmarkProgress {
                step: label,
                current: step,
                total,
            });
        };

        report_step("sequential baseline".into());
        let baseline = execute_strategy(Strategy::Sequential, cfg.trials, &cfg.params);
        let baseline_stats = baseline
            .outcome
            .clone()
            .context("sequential baseline failed")?;
        let baseline_ms = millis(baseline.duration);

        let mut rows = Vec::with_capacity(cfg.thread_counts.len());
        for &threads in &cfg.thread_counts {
            report_step(format!("partitioned pool, {threads} threads"));
            let executor = execute_strategy(
                Strategy::PartitionedPool { workers: threads },
                cfg.trials,
                &cfg.params,
            );
            executor
                .outcome
                .clone()
                .with_context(|| format!("partitioned pool with {threads} threads failed"))?;

            report_step(format!("recursive split, {threads} threads"));
            let fork_join = execute_strategy(
                Strategy::RecursiveSplit {
                    threshold: cfg.threshold,
                    threads,
                },
                cfg.trials,
                &cfg.params,
            );
            fork_join
                .outcome
                .clone()
                .with_context(|| format!("recursive split with {threads} threads failed"))?;

            let executor_time = millis(executor.duration);
            let fork_join_time = millis(fork_join.duration);
            let executor_speedup = speedup(baseline_ms, executor_time);
            let fork_join_speedup = speedup(baseline_ms, fork_join_time);

            let warning = analyze_comparison_results(&[baseline.clone(), executor, fork_join])
                .err()
                .map(|e| e.to_string());
            if let Some(w) = &warning {
                tracing::warn!(threads, "{w}");
            }

            rows.push(BenchmarkRow {
                threads,
                executor_time,
                executor_speedup,
                executor_efficiency: efficiency(executor_speedup, threads),
                fork_join_time,
                fork_join_speedup,
                fork_join_efficiency: efficiency(fork_join_speedup, threads),
                warning,
            });
        }
        self.reporter.complete();

        Ok(BenchmarkReport {
            trials: cfg.trials,
            threshold: cfg.threshold,
            baseline_ms,
            baseline_stats,
            rows,
        })
    }
}
