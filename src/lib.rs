//! Shared helpers for the workspace integration tests.

use sirbench_core::constants::MEAN_TOLERANCE;
use sirbench_core::stats::relative_difference;
use sirbench_core::{ModelParams, TrialStats};

/// The reference scenario: population 1000, beta 0.3, gamma 0.1.
#[must_use]
pub fn scenario_params() -> ModelParams {
    ModelParams::default()
}

/// Assert that two totals over `trials` trials agree on both means within
/// the cross-strategy tolerance.
pub fn assert_means_close(label: &str, a: TrialStats, b: TrialStats, trials: u64) {
    let duration = relative_difference(a.mean_duration(trials), b.mean_duration(trials));
    let peak = relative_difference(a.mean_peak(trials), b.mean_peak(trials));
    assert!(
        duration <= MEAN_TOLERANCE,
        "{label}: mean duration differs by {:.2}% ({} vs {})",
        duration * 100.0,
        a.mean_duration(trials),
        b.mean_duration(trials),
    );
    assert!(
        peak <= MEAN_TOLERANCE,
        "{label}: mean peak differs by {:.2}% ({} vs {})",
        peak * 100.0,
        a.mean_peak(trials),
        b.mean_peak(trials),
    );
}
