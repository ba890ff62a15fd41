//! CLI output formatting and result export.

use std::io;
use std::path::Path;

use sirbench_orchestration::interfaces::{BenchmarkReport, BenchmarkRow};

use crate::plot::PLOT_SCRIPT;

/// Header row of the exported CSV.
pub const CSV_HEADER: [&str; 7] = [
    "Threads",
    "ExecutorTime",
    "ExecutorSpeedup",
    "ExecutorEfficiency",
    "ForkJoinTime",
    "ForkJoinSpeedup",
    "ForkJoinEfficiency",
];

/// File name of the exported CSV.
pub const CSV_FILENAME: &str = "results.csv";

/// File name of the generated plot script.
pub const PLOT_FILENAME: &str = "plot_results.py";

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Column headings of the console table.
#[must_use]
pub fn format_table_header() -> String {
    format!(
        "{:<8} {:<12} {:<12} {:<12} {:<12} {:<12}",
        "Threads", "Exec Time", "Speedup", "Efficiency", "FJ Time", "FJ Speedup"
    )
}

/// One console table line.
#[must_use]
pub fn format_table_row(row: &BenchmarkRow) -> String {
    format!(
        "{:<8} {:<12.2} {:<12} {:<12} {:<12.2} {:<12}",
        row.threads,
        row.executor_time,
        format!("{:.2}x", row.executor_speedup),
        format!("{:.1}%", row.executor_efficiency),
        row.fork_join_time,
        format!("{:.2}x", row.fork_join_speedup),
    )
}

fn csv_record(row: &BenchmarkRow) -> [String; 7] {
    [
        row.threads.to_string(),
        format!("{:.2}", row.executor_time),
        format!("{:.2}", row.executor_speedup),
        format!("{:.1}", row.executor_efficiency),
        format!("{:.2}", row.fork_join_time),
        format!("{:.2}", row.fork_join_speedup),
        format!("{:.1}", row.fork_join_efficiency),
    ]
}

/// Write the report rows as CSV to any writer.
pub fn write_csv_to<W: io::Write>(out: W, report: &BenchmarkReport) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for row in &report.rows {
        writer.write_record(csv_record(row))?;
    }
    writer.flush()
}

/// Write `results.csv` into `dir` and return its path.
pub fn write_csv(dir: &Path, report: &BenchmarkReport) -> io::Result<std::path::PathBuf> {
    let path = dir.join(CSV_FILENAME);
    let file = std::fs::File::create(&path)?;
    write_csv_to(file, report)?;
    Ok(path)
}

/// Write `plot_results.py` into `dir` and return its path.
pub fn write_plot_script(dir: &Path) -> io::Result<std::path::PathBuf> {
    let path = dir.join(PLOT_FILENAME);
    std::fs::write(&path, PLOT_SCRIPT)?;
    Ok(path)
}
