//! Repeated timing of a fallible scheduler run.

use std::time::{Duration, Instant};

/// Wall-clock spread of the measured runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimings {
    pub median: Duration,
    pub fastest: Duration,
    pub slowest: Duration,
    pub runs: u32,
}

/// Call `run` `warmup` times untimed, then `runs` times timed.
///
/// The first error stops the measurement and is returned as is.
pub fn time_runs<E>(
    warmup: u32,
    runs: u32,
    mut run: impl FnMut() -> Result<(), E>,
) -> Result<RunTimings, E> {
    for _ in 0..warmup {
        run()?;
    }

    let mut samples = Vec::with_capacity(runs as usize);
    for _ in 0..runs {
        let start = Instant::now();
        run()?;
        samples.push(start.elapsed());
    }
    samples.sort_unstable();

    let median = match samples.len() {
        0 => Duration::ZERO,
        n if n % 2 == 1 => samples[n / 2],
        n => (samples[n / 2 - 1] + samples[n / 2]) / 2,
    };
    Ok(RunTimings {
        median,
        fastest: samples.first().copied().unwrap_or_default(),
        slowest: samples.last().copied().unwrap_or_default(),
        runs,
    })
}
