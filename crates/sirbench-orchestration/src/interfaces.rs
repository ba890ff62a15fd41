//! Orchestration interfaces.

use std::fmt;
use std::time::Duration;

use sirbench_core::{SimError, TrialStats};

/// A way of executing a batch of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Everything on the calling thread.
    Sequential,
    /// Static partitioning over a fixed pool.
    PartitionedPool { workers: usize },
    /// Recursive halving on a work-stealing pool.
    RecursiveSplit { threshold: u64, threads: usize },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::PartitionedPool { workers } => write!(f, "partitioned-pool(workers={workers})"),
            Self::RecursiveSplit { threshold, threads } => {
                write!(f, "recursive-split(threshold={threshold}, threads={threads})")
            }
        }
    }
}

/// Result of one timed strategy execution.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    /// Strategy that produced this result.
    pub strategy: Strategy,
    /// Number of trials requested.
    pub trials: u64,
    /// Aggregated stats or a structured error.
    pub outcome: Result<TrialStats, SimError>,
    /// Wall-clock duration.
    pub duration: Duration,
}

/// Timings for one thread count.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    pub threads: usize,
    pub executor_time: f64,
    pub executor_speedup: f64,
    pub executor_efficiency: f64,
    pub fork_join_time: f64,
    pub fork_join_speedup: f64,
    pub fork_join_efficiency: f64,
    /// Set when a strategy's means drifted from the baseline.
    pub warning: Option<String>,
}

/// Full output of a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Trials per strategy execution.
    pub trials: u64,
    /// Split threshold used by the recursive scheduler.
    pub threshold: u64,
    /// Sequential baseline wall time in milliseconds.
    pub baseline_ms: f64,
    /// Sequential baseline totals.
    pub baseline_stats: TrialStats,
    /// One row per thread count, in ascending order.
    pub rows: Vec<BenchmarkRow>,
}

impl BenchmarkReport {
    /// Row with the highest partitioned-pool speedup.
    #[must_use]
    pub fn best_executor(&self) -> Option<&BenchmarkRow> {
        self.rows
            .iter()
            .max_by(|a, b| a.executor_speedup.total_cmp(&b.executor_speedup))
    }

    /// Row with the highest fork-join speedup.
    #[must_use]
    pub fn best_fork_join(&self) -> Option<&BenchmarkRow> {
        self.rows
            .iter()
            .max_by(|a, b| a.fork_join_speedup.total_cmp(&b.fork_join_speedup))
    }
}

/// A step of a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkProgress {
    /// Current step name.
    pub step: String,
    /// Current step number (1-based).
    pub current: usize,
    /// Total number of steps.
    pub total: usize,
}

/// Trait for reporting progress to the user.
pub trait ProgressReporter: Send + Sync {
    /// Report that a step started.
    fn report(&self, progress: &BenchmarkProgress);

    /// Report completion.
    fn complete(&self);
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present the run configuration before any work starts.
    fn present_header(&self, trials: u64, thread_counts: &[usize]);

    /// Present the sequential baseline.
    fn present_baseline(&self, baseline_ms: f64);

    /// Present the finished table.
    fn present_report(&self, report: &BenchmarkReport);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Null progress reporter (does nothing).
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn report(&self, _progress: &BenchmarkProgress) {}
    fn complete(&self) {}
}
