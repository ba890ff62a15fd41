//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use sirbench_cli::output::format_number;
use tempfile::TempDir;

/// Binary isolated from any calibration profile or env overrides.
fn sirbench(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sirbench").expect("binary not found");
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("SIRBENCH_TRIALS")
        .env_remove("SIRBENCH_THRESHOLD");
    cmd
}

#[test]
fn help_flag() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recursive splitting"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sirbench"));
}

#[test]
fn small_benchmark_prints_table_and_exports() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "200", "-t", "50", "--population", "100", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequential time:"))
        .stdout(predicate::str::contains("FJ Speedup"))
        .stdout(predicate::str::contains("Results saved"));

    let csv = std::fs::read_to_string(tmp.path().join("results.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Threads,ExecutorTime,ExecutorSpeedup,ExecutorEfficiency,ForkJoinTime,ForkJoinSpeedup,ForkJoinEfficiency"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,"));
    assert!(lines[2].starts_with("2,"));
    assert!(tmp.path().join("plot_results.py").exists());
}

#[test]
fn output_dir_is_created() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("runs").join("a");
    sirbench(&tmp)
        .args(["-n", "100", "-t", "25", "--population", "50", "-q", "-o"])
        .arg(&out)
        .arg("2")
        .assert()
        .success();
    assert!(out.join("results.csv").exists());
    assert!(out.join("plot_results.py").exists());
}

#[test]
fn no_export_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "100", "-t", "25", "--population", "50", "--no-export", "2"])
        .assert()
        .success();
    assert!(!tmp.path().join("results.csv").exists());
    assert!(!tmp.path().join("plot_results.py").exists());
}

#[test]
fn no_plot_script_keeps_csv() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "100", "-t", "25", "--population", "50", "--no-plot-script", "1"])
        .assert()
        .success();
    assert!(tmp.path().join("results.csv").exists());
    assert!(!tmp.path().join("plot_results.py").exists());
}

#[test]
fn quiet_mode_prints_rows_only() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "100", "-t", "25", "--population", "50", "-q", "--no-export", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("4 "))
        .stdout(predicate::str::contains("Sequential").not());
}

#[test]
fn binomial_sampling() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args([
            "-n",
            "100",
            "-t",
            "25",
            "--sampling",
            "binomial",
            "--no-export",
            "2",
        ])
        .assert()
        .success();
}

#[test]
fn invalid_thread_counts_fall_back_with_warning() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "64", "-t", "64", "--population", "20", "-q", "--no-export", "zero"])
        .assert()
        .success()
        .stderr(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("32 "));
}

#[test]
fn env_var_trials() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .env("SIRBENCH_TRIALS", "120")
        .args(["-t", "30", "--population", "50", "-v", "--no-export", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total simulations: 120"));
}

#[test]
fn invalid_rate_exits_with_config_code() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "10", "--beta", "1.5"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("beta"));
}

#[test]
fn zero_trials_exits_with_config_code() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "0", "2"])
        .assert()
        .code(4);
}

#[test]
fn zero_threshold_exits_with_config_code() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "10", "-t", "0", "2"])
        .assert()
        .code(4);
}

#[test]
fn unknown_sampling_exits_with_config_code() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["-n", "10", "--sampling", "poisson"])
        .assert()
        .code(4);
}

#[test]
fn strict_mode_passes_on_deterministic_model() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args([
            "-n", "100", "-t", "10", "--beta", "0", "--gamma", "1", "--strict", "--no-export", "2",
        ])
        .assert()
        .success();
}

#[test]
fn shell_completion_bash() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sirbench"));
}

#[test]
fn shell_completion_zsh() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["--completion", "zsh"])
        .assert()
        .success();
}

#[test]
fn auto_calibration_saves_profile_used_by_next_run() {
    let tmp = TempDir::new().unwrap();
    sirbench(&tmp)
        .args(["--auto-calibrate", "-n", "400", "--population", "50", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Split threshold:"));

    let profile_path = tmp
        .path()
        .join("config")
        .join("sirbench")
        .join("calibration.json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&profile_path).unwrap()).unwrap();
    let threshold = json["split_threshold"].as_u64().unwrap();

    sirbench(&tmp)
        .args(["-n", "100", "--population", "50", "-v", "--no-export", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Split threshold: {}",
            format_number(threshold)
        )))
        .stderr(predicate::str::contains("another workload"));
}
