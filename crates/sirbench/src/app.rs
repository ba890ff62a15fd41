//! Application entry point and dispatch.

use anyhow::{Context, Result};

use sirbench_calibration::calibration::{CalibrationEngine, CalibrationMode, CalibrationProgress};
use sirbench_calibration::io::ProfileStore;
use sirbench_calibration::profile::{logical_cores, ProfileFit};
use sirbench_calibration::CalibrationProfile;
use sirbench_cli::output::{write_csv, write_plot_script};
use sirbench_cli::{ui, CLIProgressReporter, CLIResultPresenter};
use sirbench_core::constants::DEFAULT_SPLIT_THRESHOLD;
use sirbench_core::{ModelParams, SimError};
use sirbench_orchestration::interfaces::{BenchmarkReport, ResultPresenter};
use sirbench_orchestration::{BenchmarkConfig, BenchmarkDriver};

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        sirbench_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    if config.calibrate || config.auto_calibrate {
        return run_calibration(config);
    }

    run_benchmark(config)
}

/// Pick the split threshold: explicit flag, then a profile tuned for the
/// same model on this machine, then the default.
///
/// `threads` is the largest pool the run will use. A profile measured on
/// another trial count or pool size still applies, with a warning.
pub fn resolve_threshold(
    flag: Option<u64>,
    params: &ModelParams,
    trials: u64,
    threads: usize,
    profile: Option<CalibrationProfile>,
) -> u64 {
    if let Some(threshold) = flag {
        return threshold;
    }
    let Some(profile) = profile else {
        return DEFAULT_SPLIT_THRESHOLD;
    };
    match profile.fit(params, trials, threads, logical_cores()) {
        ProfileFit::Exact => {
            tracing::info!(threshold = profile.split_threshold, "using calibrated split threshold");
            profile.split_threshold
        }
        ProfileFit::OtherShape {
            trials: tuned_trials,
            threads: tuned_threads,
        } => {
            tracing::warn!(
                threshold = profile.split_threshold,
                tuned_trials,
                tuned_threads,
                trials,
                threads,
                "calibration profile was measured on another workload, its threshold may not be optimal"
            );
            profile.split_threshold
        }
        ProfileFit::Unusable(reason) => {
            tracing::warn!(%reason, "ignoring calibration profile");
            DEFAULT_SPLIT_THRESHOLD
        }
    }
}

/// First row warning as a mismatch error.
pub fn check_strict(report: &BenchmarkReport) -> Result<(), SimError> {
    match report.rows.iter().find_map(|row| row.warning.as_ref()) {
        Some(warning) => Err(SimError::Mismatch(warning.clone())),
        None => Ok(()),
    }
}

fn run_benchmark(config: &AppConfig) -> Result<()> {
    let params = config.model_params()?;
    let (thread_counts, warning) = config.thread_counts();
    if let Some(warning) = warning {
        ui::print_warning(&warning);
    }
    let max_threads = thread_counts.iter().copied().max().unwrap_or(1);
    let threshold = resolve_threshold(
        config.threshold,
        &params,
        config.trials,
        max_threads,
        ProfileStore::user_default().load(),
    );

    let presenter = CLIResultPresenter::new(config.verbose, config.quiet);
    presenter.present_header(config.trials, &thread_counts);

    let reporter = CLIProgressReporter::new(config.quiet);
    let driver = BenchmarkDriver::new(
        BenchmarkConfig {
            trials: config.trials,
            thread_counts,
            threshold,
            params,
        },
        &reporter,
    );
    let report = driver.run()?;

    presenter.present_baseline(report.baseline_ms);
    presenter.present_report(&report);

    if !config.no_export {
        export(config, &report)?;
    }

    if config.strict {
        check_strict(&report)?;
    }
    Ok(())
}

fn export(config: &AppConfig, report: &BenchmarkReport) -> Result<()> {
    let dir = &config.output_dir;
    std::fs::create_dir_all(dir)
        .map_err(SimError::from)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;

    let csv_path = write_csv(dir, report)
        .map_err(SimError::from)
        .context("cannot write results")?;
    if !config.quiet {
        ui::print_success(&format!("Results saved to {}", csv_path.display()));
    }

    if !config.no_plot_script {
        let plot_path = write_plot_script(dir)
            .map_err(SimError::from)
            .context("cannot write plot script")?;
        if !config.quiet {
            ui::print_success(&format!(
                "Run 'python {}' to generate graphs",
                plot_path.display()
            ));
        }
    }
    Ok(())
}

fn run_calibration(config: &AppConfig) -> Result<()> {
    let params = config.model_params()?;
    let threads = if config.threads.is_empty() {
        logical_cores()
    } else {
        let (counts, warning) = config.thread_counts();
        if let Some(warning) = warning {
            ui::print_warning(&warning);
        }
        counts.iter().copied().max().unwrap_or_else(logical_cores)
    };

    let mode = if config.calibrate {
        CalibrationMode::Full
    } else {
        CalibrationMode::Quick
    };

    let mut engine = CalibrationEngine::new(mode, config.trials, threads, params);
    if !config.quiet {
        engine = engine.with_progress(Box::new(|p: CalibrationProgress| {
            eprintln!("[{}/{}] {}", p.current, p.total, p.step);
        }));
    }
    let profile = engine.calibrate()?;

    if !config.quiet {
        println!("Calibration complete:");
        println!("  Split threshold: {}", profile.split_threshold);
        println!("  Threads: {}", profile.threads);
        println!("  Trials per run: {}", profile.trials);
    }

    let store = ProfileStore::user_default();
    store
        .save(&profile)
        .map_err(SimError::from)
        .context("cannot save calibration profile")?;
    if !config.quiet {
        ui::print_success(&format!("Profile saved to {}", store.path().display()));
    }
    Ok(())
}
