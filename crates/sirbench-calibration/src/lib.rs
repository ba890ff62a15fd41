//! # sirbench-calibration
//!
//! Split-threshold sweeps and persisted calibration profiles.

pub mod calibration;
pub mod io;
pub mod profile;
pub mod runner;
pub mod sweep;

pub use calibration::{CalibrationEngine, CalibrationMode, CalibrationProgress};
pub use io::ProfileStore;
pub use profile::{CalibrationProfile, ProfileFit};
