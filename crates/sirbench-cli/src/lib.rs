//! # sirbench-cli
//!
//! Benchmark table, CSV export, plot script, progress display, and shell
//! completion.

pub mod completion;
pub mod output;
pub mod plot;
pub mod presenter;
pub mod progress;
pub mod ui;

pub use presenter::CLIResultPresenter;
pub use progress::CLIProgressReporter;
