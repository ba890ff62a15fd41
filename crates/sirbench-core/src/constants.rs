//! Constants for the trial model and scheduling defaults.

/// Maximum number of simulated days per trial.
pub const MAX_DAYS: u32 = 365;

/// Default population size.
pub const DEFAULT_POPULATION: u32 = 1000;

/// Default transmission rate.
pub const DEFAULT_BETA: f64 = 0.3;

/// Default recovery rate.
pub const DEFAULT_GAMMA: f64 = 0.1;

/// Default number of trials for a benchmark run.
pub const DEFAULT_TRIALS: u64 = 1_000_000;

/// Default split threshold (in trials) for the recursive scheduler.
///
/// Below this many trials a sub-batch is executed directly instead of being
/// split further.
pub const DEFAULT_SPLIT_THRESHOLD: u64 = 50_000;

/// Thread counts benchmarked when none are given.
pub const DEFAULT_THREAD_COUNTS: [usize; 6] = [1, 2, 4, 8, 16, 32];

/// Relative tolerance used when comparing per-trial means across strategies.
pub const MEAN_TOLERANCE: f64 = 0.05;

/// Exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Strategy results disagreed beyond tolerance.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
