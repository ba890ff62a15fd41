//! Split-threshold sweeps for the recursive scheduler.

use sirbench_core::{ModelParams, SimError, TrialBatchExecutor};
use sirbench_orchestration::RecursiveSplitScheduler;

use crate::runner::time_runs;

/// Timing of the recursive scheduler at one threshold.
#[derive(Debug, Clone)]
pub struct ThresholdSample {
    pub threshold: u64,
    pub median_ns: u64,
}

/// Candidate thresholds giving roughly 1 to 64 leaves per thread.
#[must_use]
pub fn candidate_thresholds(trials: u64, threads: usize) -> Vec<u64> {
    let threads = (threads as u64).max(1);
    let mut candidates: Vec<u64> = [1u64, 2, 4, 8, 16, 32, 64]
        .iter()
        .map(|&leaves| (trials / (threads * leaves)).max(1))
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// Time the recursive scheduler at each candidate threshold.
#[allow(clippy::cast_possible_truncation)]
pub fn sweep_thresholds(
    trials: u64,
    threads: usize,
    candidates: &[u64],
    params: &ModelParams,
    iterations: u32,
) -> Result<Vec<ThresholdSample>, SimError> {
    let executor = TrialBatchExecutor::new(*params)?;
    let mut samples = Vec::with_capacity(candidates.len());
    for &threshold in candidates {
        let scheduler = RecursiveSplitScheduler::new(threshold)?.with_threads(threads)?;
        let timing = time_runs(1, iterations, || scheduler.run(trials, &executor).map(drop))?;
        tracing::debug!(threshold, median = ?timing.median, "threshold sample");
        samples.push(ThresholdSample {
            threshold,
            median_ns: timing.median.as_nanos() as u64,
        });
    }
    Ok(samples)
}

/// Threshold with the lowest median; ties go to the larger threshold.
#[must_use]
pub fn best_threshold(samples: &[ThresholdSample]) -> Option<u64> {
    samples
        .iter()
        .min_by(|a, b| {
            a.median_ns
                .cmp(&b.median_ns)
                .then_with(|| b.threshold.cmp(&a.threshold))
        })
        .map(|s| s.threshold)
}
