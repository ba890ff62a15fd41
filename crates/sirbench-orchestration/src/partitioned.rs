//! Static partitioning across a fixed-size worker pool.

use std::panic::{self, AssertUnwindSafe};

use rayon::ThreadPoolBuilder;

use sirbench_core::error::{panic_message, require_positive};
use sirbench_core::{merge_all, BatchRunner, SimError, TrialStats};

/// Split `trials` into `workers` contiguous sub-batch sizes.
///
/// Every batch but the last gets `trials / workers`; the last absorbs the
/// remainder. When `workers > trials` the leading batches are empty.
#[must_use]
pub fn partition_sizes(trials: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }
    let count = workers as u64;
    let base = trials / count;
    let mut sizes = vec![base; workers];
    if let Some(last) = sizes.last_mut() {
        *last = trials - base * (count - 1);
    }
    sizes
}

/// Runs one sub-batch per worker on a dedicated pool of exactly `workers`
/// threads and merges the results.
#[derive(Debug, Clone, Copy)]
pub struct PartitionedPoolScheduler {
    workers: usize,
}

impl PartitionedPoolScheduler {
    /// Create a scheduler for `workers` threads.
    pub fn new(workers: usize) -> Result<Self, SimError> {
        require_positive(workers as u64, "worker count")?;
        Ok(Self { workers })
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `trials` trials split across the pool.
    ///
    /// Fails with `WorkerFault` if the pool cannot be built or any sub-batch
    /// panics; results from the other workers are discarded.
    pub fn run<R: BatchRunner>(&self, trials: u64, runner: &R) -> Result<TrialStats, SimError> {
        require_positive(trials, "trial count")?;
        let sizes = partition_sizes(trials, self.workers);

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("sirbench-worker-{i}"))
            .build()
            .map_err(|e| SimError::WorkerFault(format!("failed to create worker pool: {e}")))?;
        tracing::debug!(workers = self.workers, ?sizes, "submitting partitioned batches");

        let (tx, rx) = crossbeam_channel::bounded(sizes.len());
        pool.scope(|scope| {
            for (index, &size) in sizes.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| runner.run_batch(size)))
                        .map_err(|payload| {
                            SimError::WorkerFault(format!(
                                "worker {index} panicked: {}",
                                panic_message(payload.as_ref())
                            ))
                        });
                    // Capacity equals the number of batches, so this never blocks.
                    let _ = tx.send(result);
                });
            }
        });
        drop(tx);

        let mut parts = Vec::with_capacity(sizes.len());
        for result in rx {
            parts.push(result?);
        }
        if parts.len() != sizes.len() {
            return Err(SimError::WorkerFault(format!(
                "expected {} worker results, received {}",
                sizes.len(),
                parts.len()
            )));
        }
        Ok(merge_all(parts))
    }
}
