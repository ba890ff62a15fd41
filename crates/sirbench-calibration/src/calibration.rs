//! Calibration engine.

use sirbench_core::error::require_positive;
use sirbench_core::{ModelParams, SimError};

use crate::profile::CalibrationProfile;
use crate::sweep::{self, ThresholdSample};

/// Mode of calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMode {
    /// Sweep every candidate threshold with several measured runs.
    Full,
    /// Sweep a reduced candidate set on a tenth of the trials.
    Quick,
}

/// Progress callback for calibration.
pub type ProgressCallback = Box<dyn Fn(CalibrationProgress) + Send>;

/// Progress information during calibration.
#[derive(Debug, Clone)]
pub struct CalibrationProgress {
    /// Current step name.
    pub step: String,
    /// Current step number (1-based).
    pub current: usize,
    /// Total number of steps.
    pub total: usize,
}

/// Finds the fastest split threshold for a given workload.
pub struct CalibrationEngine {
    mode: CalibrationMode,
    trials: u64,
    threads: usize,
    params: ModelParams,
    progress_cb: Option<ProgressCallback>,
}

impl CalibrationEngine {
    /// Create a new calibration engine.
    #[must_use]
    pub fn new(mode: CalibrationMode, trials: u64, threads: usize, params: ModelParams) -> Self {
        Self {
            mode,
            trials,
            threads,
            params,
            progress_cb: None,
        }
    }

    /// Set a progress callback.
    #[must_use]
    pub fn with_progress(mut self, cb: ProgressCallback) -> Self {
        self.progress_cb = Some(cb);
        self
    }

    /// Run calibration and produce a profile.
    pub fn calibrate(&self) -> Result<CalibrationProfile, SimError> {
        require_positive(self.trials, "trial count")?;
        require_positive(self.threads as u64, "thread count")?;
        self.params.validate()?;
        match self.mode {
            CalibrationMode::Full => self.sweep(self.trials, 5, |c| c),
            CalibrationMode::Quick => self.sweep((self.trials / 10).max(1), 2, |c| {
                c.into_iter().step_by(2).collect()
            }),
        }
    }

    fn report_progress(&self, step: &str, current: usize, total: usize) {
        if let Some(cb) = &self.progress_cb {
            cb(CalibrationProgress {
                step: step.to_string(),
                current,
                total,
            });
        }
    }

    fn sweep(
        &self,
        trials: u64,
        iterations: u32,
        select: impl FnOnce(Vec<u64>) -> Vec<u64>,
    ) -> Result<CalibrationProfile, SimError> {
        let candidates = select(sweep::candidate_thresholds(trials, self.threads));
        let total = candidates.len() + 1;

        let mut samples: Vec<ThresholdSample> = Vec::with_capacity(candidates.len());
        for (i, &threshold) in candidates.iter().enumerate() {
            self.report_progress(&format!("Timing threshold {threshold}"), i + 1, total);
            samples.extend(sweep::sweep_thresholds(
                trials,
                self.threads,
                &[threshold],
                &self.params,
                iterations,
            )?);
        }

        self.report_progress("Building profile", total, total);
        let split_threshold = sweep::best_threshold(&samples)
            .ok_or_else(|| SimError::InvalidConfiguration("no candidate thresholds".into()))?;
        tracing::info!(split_threshold, trials, threads = self.threads, "calibration finished");

        Ok(CalibrationProfile::new(
            split_threshold,
            self.params,
            trials,
            self.threads,
        ))
    }
}
