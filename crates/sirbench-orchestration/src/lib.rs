//! # sirbench-orchestration
//!
//! Partitioned-pool and recursive-split schedulers, the scheduling entry
//! points, and the benchmark driver that compares them.

pub mod driver;
pub mod interfaces;
pub mod orchestrator;
pub mod partitioned;
pub mod recursive;

pub use driver::{BenchmarkConfig, BenchmarkDriver};
pub use interfaces::{ProgressReporter, ResultPresenter, Strategy};
pub use orchestrator::{
    analyze_comparison_results, execute_strategy, run_partitioned_pool, run_recursive_split,
    run_sequential,
};
pub use partitioned::PartitionedPoolScheduler;
pub use recursive::RecursiveSplitScheduler;
