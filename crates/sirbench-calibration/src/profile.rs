//! Persisted result of a threshold sweep.
//!
//! The fastest split threshold depends on the cost of one trial (the model
//! parameters), on how many trials are split, on how many workers steal
//! leaves, and on the machine. A profile records all four so a later run
//! can tell whether the threshold still applies to it.

use serde::{Deserialize, Serialize};

use sirbench_core::ModelParams;

/// Profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// Machine a sweep ran on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    pub cpu_brand: String,
    pub logical_cores: usize,
}

impl HostInfo {
    /// Describe the current machine.
    #[must_use]
    pub fn detect() -> Self {
        let sys = sysinfo::System::new_all();
        let cpu_brand = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_default();
        Self {
            cpu_brand,
            logical_cores: logical_cores(),
        }
    }
}

/// Logical CPUs available to this process, 1 if unknown.
#[must_use]
pub fn logical_cores() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZero::get)
}

/// How a stored profile relates to the run about to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileFit {
    /// Tuned for exactly this workload.
    Exact,
    /// Same model and machine, but measured with another batch size or
    /// worker count; the threshold is a reasonable guess only.
    OtherShape { trials: u64, threads: usize },
    /// Must not be used; carries the reason.
    Unusable(String),
}

/// Threshold chosen by a sweep and the workload it was measured on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub version: u32,
    pub split_threshold: u64,
    pub params: ModelParams,
    /// Trials per measured run.
    pub trials: u64,
    /// Worker threads in the measured pool.
    pub threads: usize,
    pub host: HostInfo,
    /// Seconds since the Unix epoch.
    pub measured_at: u64,
}

impl CalibrationProfile {
    /// Record a sweep result measured now on this machine.
    #[must_use]
    pub fn new(split_threshold: u64, params: ModelParams, trials: u64, threads: usize) -> Self {
        let measured_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self {
            version: PROFILE_VERSION,
            split_threshold,
            params,
            trials,
            threads,
            host: HostInfo::detect(),
            measured_at,
        }
    }

    /// Compare against a run of `trials` trials on `threads` workers with
    /// `params`, on a machine with `cores` logical CPUs.
    #[must_use]
    pub fn fit(
        &self,
        params: &ModelParams,
        trials: u64,
        threads: usize,
        cores: usize,
    ) -> ProfileFit {
        if self.version != PROFILE_VERSION {
            return ProfileFit::Unusable(format!("profile format v{}", self.version));
        }
        if self.split_threshold == 0 || self.params.validate().is_err() {
            return ProfileFit::Unusable("corrupt threshold or parameters".into());
        }
        if self.params != *params {
            return ProfileFit::Unusable("tuned for other model parameters".into());
        }
        if self.host.logical_cores != cores {
            return ProfileFit::Unusable(format!(
                "measured on a {}-core host",
                self.host.logical_cores
            ));
        }
        if self.trials != trials || self.threads != threads {
            return ProfileFit::OtherShape {
                trials: self.trials,
                threads: self.threads,
            };
        }
        ProfileFit::Exact
    }
}
