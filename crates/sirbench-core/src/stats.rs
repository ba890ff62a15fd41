//! Trial statistics and the merge rule used to combine partial results.
//!
//! `merge` is a component-wise sum, so it is associative and commutative
//! with `TrialStats::default()` as identity. Any split of a batch, whether
//! none, binary recursive, or N-way static, reduces to the same totals for
//! the same underlying trial outcomes.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::model::TrialOutcome;

/// Summed outcomes of some number of trials.
///
/// The trial count is not stored; callers track how many trials they asked
/// for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialStats {
    /// Sum of trial durations in days.
    pub total_duration: u64,
    /// Sum of per-trial infected peaks.
    pub total_peak: u64,
}

impl TrialStats {
    #[must_use]
    pub const fn new(total_duration: u64, total_peak: u64) -> Self {
        Self {
            total_duration,
            total_peak,
        }
    }

    /// Stats for a single trial outcome.
    #[must_use]
    pub fn from_outcome(outcome: &TrialOutcome) -> Self {
        Self::new(
            u64::from(outcome.duration),
            u64::from(outcome.peak_infected),
        )
    }

    /// Mean duration over `trials` trials, or 0 when `trials` is 0.
    #[must_use]
    pub fn mean_duration(&self, trials: u64) -> f64 {
        if trials == 0 {
            return 0.0;
        }
        self.total_duration as f64 / trials as f64
    }

    /// Mean peak over `trials` trials, or 0 when `trials` is 0.
    #[must_use]
    pub fn mean_peak(&self, trials: u64) -> f64 {
        if trials == 0 {
            return 0.0;
        }
        self.total_peak as f64 / trials as f64
    }
}

/// Combine two partial results.
#[must_use]
pub const fn merge(a: TrialStats, b: TrialStats) -> TrialStats {
    TrialStats {
        total_duration: a.total_duration + b.total_duration,
        total_peak: a.total_peak + b.total_peak,
    }
}

/// Fold any number of partial results into one.
pub fn merge_all<I>(parts: I) -> TrialStats
where
    I: IntoIterator<Item = TrialStats>,
{
    parts.into_iter().fold(TrialStats::default(), merge)
}

/// Relative difference `|a - b| / max(|a|, |b|)`, 0 when both are 0.
#[must_use]
pub fn relative_difference(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        return 0.0;
    }
    (a - b).abs() / scale
}

impl Add for TrialStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        merge(self, rhs)
    }
}

impl Sum for TrialStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        merge_all(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Terminal;
    use proptest::prelude::*;

    fn stats() -> impl Strategy<Value = TrialStats> {
        (0u64..1 << 40, 0u64..1 << 40).prop_map(|(d, p)| TrialStats::new(d, p))
    }

    #[test]
    fn merge_is_component_wise_sum() {
        let a = TrialStats::new(10, 3);
        let b = TrialStats::new(5, 7);
        assert_eq!(merge(a, b), TrialStats::new(15, 10));
        assert_eq!(a + b, TrialStats::new(15, 10));
    }

    #[test]
    fn default_is_identity() {
        let a = TrialStats::new(42, 9);
        assert_eq!(merge(a, TrialStats::default()), a);
        assert_eq!(merge(TrialStats::default(), a), a);
    }

    #[test]
    fn merge_all_empty_is_default() {
        assert_eq!(merge_all(Vec::new()), TrialStats::default());
    }

    #[test]
    fn sum_matches_merge_all() {
        let parts = vec![
            TrialStats::new(1, 2),
            TrialStats::new(3, 4),
            TrialStats::new(5, 6),
        ];
        let summed: TrialStats = parts.iter().copied().sum();
        assert_eq!(summed, merge_all(parts));
        assert_eq!(summed, TrialStats::new(9, 12));
    }

    #[test]
    fn from_outcome_widens() {
        let outcome = TrialOutcome {
            duration: 120,
            peak_infected: 431,
            terminal: Terminal::Extinguished,
        };
        assert_eq!(TrialStats::from_outcome(&outcome), TrialStats::new(120, 431));
    }

    #[test]
    fn means() {
        let s = TrialStats::new(300, 60);
        assert!((s.mean_duration(3) - 100.0).abs() < f64::EPSILON);
        assert!((s.mean_peak(3) - 20.0).abs() < f64::EPSILON);
        assert!(s.mean_duration(0).abs() < f64::EPSILON);
    }

    #[test]
    fn relative_difference_cases() {
        assert!(relative_difference(0.0, 0.0).abs() < f64::EPSILON);
        assert!((relative_difference(100.0, 95.0) - 0.05).abs() < 1e-12);
        assert!((relative_difference(95.0, 100.0) - 0.05).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn merge_associative(a in stats(), b in stats(), c in stats()) {
            prop_assert_eq!(merge(merge(a, b), c), merge(a, merge(b, c)));
        }

        #[test]
        fn merge_commutative(a in stats(), b in stats(), c in stats()) {
            prop_assert_eq!(merge(a, b), merge(b, a));
            prop_assert_eq!(merge(merge(a, b), c), merge(b, merge(a, c)));
        }

        #[test]
        fn merge_all_order_independent(mut parts in prop::collection::vec(stats(), 0..16)) {
            let forward = merge_all(parts.clone());
            parts.reverse();
            prop_assert_eq!(forward, merge_all(parts));
        }
    }
}
