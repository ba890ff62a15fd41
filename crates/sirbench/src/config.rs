//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;

use sirbench_core::constants::{
    DEFAULT_BETA, DEFAULT_GAMMA, DEFAULT_POPULATION, DEFAULT_THREAD_COUNTS, DEFAULT_TRIALS,
};
use sirbench_core::{ModelParams, SamplingMode, SimError};
use sirbench_orchestration::driver::parse_thread_counts;

/// Parallel SIR Monte Carlo benchmark: static partitioning vs recursive splitting.
#[derive(Parser, Debug)]
#[command(name = "sirbench", version, about)]
pub struct AppConfig {
    /// Thread counts to benchmark [default: 1 2 4 8 16 32].
    #[arg(value_name = "THREADS")]
    pub threads: Vec<String>,

    /// Number of simulated epidemics per strategy run.
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS, env = "SIRBENCH_TRIALS")]
    pub trials: u64,

    /// Individuals per simulated epidemic.
    #[arg(short, long, default_value_t = DEFAULT_POPULATION)]
    pub population: u32,

    /// Daily infection rate.
    #[arg(long, default_value_t = DEFAULT_BETA)]
    pub beta: f64,

    /// Daily recovery rate.
    #[arg(long, default_value_t = DEFAULT_GAMMA)]
    pub gamma: f64,

    /// Split threshold for the recursive scheduler (overrides any calibration profile).
    #[arg(short, long, env = "SIRBENCH_THRESHOLD")]
    pub threshold: Option<u64>,

    /// Transition sampling: per-individual or binomial.
    #[arg(long, default_value = "per-individual")]
    pub sampling: String,

    /// Directory receiving results.csv and plot_results.py.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Do not write results.csv.
    #[arg(long)]
    pub no_export: bool,

    /// Do not write plot_results.py.
    #[arg(long)]
    pub no_plot_script: bool,

    /// Fail when strategies disagree on mean duration or peak.
    #[arg(long)]
    pub strict: bool,

    /// Quiet mode (table rows only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Run full threshold calibration.
    #[arg(long)]
    pub calibrate: bool,

    /// Run a quick threshold calibration.
    #[arg(long)]
    pub auto_calibrate: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Model parameters from the flags, validated.
    pub fn model_params(&self) -> Result<ModelParams, SimError> {
        let sampling = SamplingMode::parse(&self.sampling)?;
        let params =
            ModelParams::new(self.population, self.beta, self.gamma).with_sampling(sampling);
        params.validate()?;
        Ok(params)
    }

    /// Thread counts from the positional arguments.
    ///
    /// Unparseable input falls back to the defaults; the second element
    /// carries the reason.
    #[must_use]
    pub fn thread_counts(&self) -> (Vec<usize>, Option<String>) {
        match parse_thread_counts(&self.threads) {
            Ok(counts) => (counts, None),
            Err(e) => (
                DEFAULT_THREAD_COUNTS.to_vec(),
                Some(format!("{e}, using defaults")),
            ),
        }
    }
}
