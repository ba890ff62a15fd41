//! Scheduling entry points, timed strategy execution, and result analysis.

use std::time::Instant;

use sirbench_core::constants::MEAN_TOLERANCE;
use sirbench_core::error::require_positive;
use sirbench_core::stats::relative_difference;
use sirbench_core::{ModelParams, SimError, TrialBatchExecutor, TrialStats};

use crate::interfaces::{Strategy, StrategyResult};
use crate::partitioned::PartitionedPoolScheduler;
use crate::recursive::RecursiveSplitScheduler;

/// Run all trials on the calling thread with one reused model.
pub fn run_sequential(trials: u64, params: &ModelParams) -> Result<TrialStats, SimError> {
    require_positive(trials, "trial count")?;
    let executor = TrialBatchExecutor::new(*params)?;
    Ok(executor.execute(trials))
}

/// Run all trials split statically across `workers` threads.
pub fn run_partitioned_pool(
    trials: u64,
    workers: usize,
    params: &ModelParams,
) -> Result<TrialStats, SimError> {
    let executor = TrialBatchExecutor::new(*params)?;
    PartitionedPoolScheduler::new(workers)?.run(trials, &executor)
}

/// Run all trials by recursive halving down to `threshold` trials, on the
/// current rayon pool.
pub fn run_recursive_split(
    trials: u64,
    threshold: u64,
    params: &ModelParams,
) -> Result<TrialStats, SimError> {
    let executor = TrialBatchExecutor::new(*params)?;
    RecursiveSplitScheduler::new(threshold)?.run(trials, &executor)
}

/// Run one strategy and time it.
pub fn execute_strategy(strategy: Strategy, trials: u64, params: &ModelParams) -> StrategyResult {
    let start = Instant::now();
    let outcome = match strategy {
        Strategy::Sequential => run_sequential(trials, params),
        Strategy::PartitionedPool { workers } => run_partitioned_pool(trials, workers, params),
        Strategy::RecursiveSplit { threshold, threads } => {
            TrialBatchExecutor::new(*params).and_then(|executor| {
                RecursiveSplitScheduler::new(threshold)?
                    .with_threads(threads)?
                    .run(trials, &executor)
            })
        }
    };
    let duration = start.elapsed();

    match &outcome {
        Ok(stats) => tracing::info!(
            strategy = %strategy,
            trials,
            elapsed_ms = duration.as_secs_f64() * 1000.0,
            mean_duration = stats.mean_duration(trials),
            "strategy finished"
        ),
        Err(e) => tracing::warn!(strategy = %strategy, error = %e, "strategy failed"),
    }

    StrategyResult {
        strategy,
        trials,
        outcome,
        duration,
    }
}

/// Check that every successful result has the same per-trial means as the
/// first one, within `MEAN_TOLERANCE`.
pub fn analyze_comparison_results(results: &[StrategyResult]) -> Result<(), SimError> {
    let valid: Vec<(&StrategyResult, &TrialStats)> = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok().map(|stats| (r, stats)))
        .collect();

    let Some(((reference, reference_stats), rest)) = valid.split_first() else {
        return Err(SimError::WorkerFault("no successful strategy results".into()));
    };

    let ref_duration = reference_stats.mean_duration(reference.trials);
    let ref_peak = reference_stats.mean_peak(reference.trials);
    for (result, stats) in rest {
        let duration_diff = relative_difference(ref_duration, stats.mean_duration(result.trials));
        let peak_diff = relative_difference(ref_peak, stats.mean_peak(result.trials));
        if duration_diff > MEAN_TOLERANCE || peak_diff > MEAN_TOLERANCE {
            return Err(SimError::Mismatch(format!(
                "{} vs {}: mean duration differs by {:.1}%, mean peak by {:.1}%",
                reference.strategy,
                result.strategy,
                duration_diff * 100.0,
                peak_diff * 100.0
            )));
        }
    }
    Ok(())
}
