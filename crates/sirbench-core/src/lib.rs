//! # sirbench-core
//!
//! Core library for SIRBench: a minimal stochastic SIR trial model, the
//! sequential batch executor used as the leaf of every scheduler, and the
//! associative merge that combines partial results.

pub mod batch;
pub mod constants;
pub mod error;
pub mod model;
pub mod params;
pub mod stats;

// Re-exports
pub use batch::{BatchRunner, TrialBatchExecutor};
pub use constants::{
    exit_codes, DEFAULT_SPLIT_THRESHOLD, DEFAULT_THREAD_COUNTS, DEFAULT_TRIALS, MAX_DAYS,
};
pub use error::SimError;
pub use model::{Terminal, TrialModel, TrialOutcome};
pub use params::{ModelParams, SamplingMode};
pub use stats::{merge, merge_all, TrialStats};
