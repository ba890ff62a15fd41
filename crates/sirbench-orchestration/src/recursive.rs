//! Recursive divide-and-conquer splitting on a work-stealing pool.

use std::panic::{self, AssertUnwindSafe};

use rayon::ThreadPoolBuilder;

use sirbench_core::error::{panic_message, require_positive};
use sirbench_core::{merge, BatchRunner, SimError, TrialStats};

/// Splits a batch in half until it is at most `threshold` trials, then runs
/// the leaf directly.
///
/// Without `with_threads` the recursion runs on the caller's current rayon
/// pool.
#[derive(Debug, Clone, Copy)]
pub struct RecursiveSplitScheduler {
    threshold: u64,
    threads: Option<usize>,
}

impl RecursiveSplitScheduler {
    /// Create a scheduler that stops splitting at `threshold` trials.
    pub fn new(threshold: u64) -> Result<Self, SimError> {
        require_positive(threshold, "split threshold")?;
        Ok(Self {
            threshold,
            threads: None,
        })
    }

    /// Run on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Result<Self, SimError> {
        require_positive(threads as u64, "thread count")?;
        self.threads = Some(threads);
        Ok(self)
    }

    #[must_use]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    #[must_use]
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Run `trials` trials.
    ///
    /// A panic in any leaf aborts the whole run with `WorkerFault`.
    pub fn run<R: BatchRunner>(&self, trials: u64, runner: &R) -> Result<TrialStats, SimError> {
        require_positive(trials, "trial count")?;
        let threshold = self.threshold;
        tracing::debug!(trials, threshold, threads = ?self.threads, "starting recursive split");

        let outcome = match self.threads {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("sirbench-fj-{i}"))
                    .build()
                    .map_err(|e| {
                        SimError::WorkerFault(format!("failed to create fork-join pool: {e}"))
                    })?;
                panic::catch_unwind(AssertUnwindSafe(|| {
                    pool.install(|| split(trials, threshold, runner))
                }))
            }
            None => panic::catch_unwind(AssertUnwindSafe(|| split(trials, threshold, runner))),
        };

        outcome.map_err(|payload| {
            SimError::WorkerFault(format!(
                "fork-join task panicked: {}",
                panic_message(payload.as_ref())
            ))
        })
    }
}

fn split<R: BatchRunner>(trials: u64, threshold: u64, runner: &R) -> TrialStats {
    if trials <= threshold {
        return runner.run_batch(trials);
    }
    let left = trials / 2;
    let right = trials - left;
    // `join` runs its first closure on this thread and leaves the second one
    // stealable: the right half is computed inline while the left is forked.
    let (right_stats, left_stats) = rayon::join(
        || split(right, threshold, runner),
        || split(left, threshold, runner),
    );
    merge(left_stats, right_stats)
}
