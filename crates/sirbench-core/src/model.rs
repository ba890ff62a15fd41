//! Single-trial stochastic SIR state machine.
//!
//! A `TrialModel` is created once per unit of work and reused across many
//! `reset` / `run` cycles. It never touches shared state: the random source
//! is passed in by the owner, so each unit of work draws from its own
//! generator.

use rand::Rng;
use rand_distr::{Binomial, Distribution};

use crate::constants::MAX_DAYS;
use crate::params::{ModelParams, SamplingMode};

/// How a trial ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// No infected individuals remain.
    Extinguished,
    /// The day limit was reached with infections still active.
    HorizonReached,
}

/// Result of one completed trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Days simulated.
    pub duration: u32,
    /// Largest infected count observed.
    pub peak_infected: u32,
    /// Terminal state.
    pub terminal: Terminal,
}

/// Mutable, reusable SIR trial.
///
/// Invariant: `susceptible + infected + recovered == population` after every
/// call to `reset` or `step`.
#[derive(Debug, Clone)]
pub struct TrialModel {
    susceptible: u32,
    infected: u32,
    recovered: u32,
    population: u32,
    beta: f64,
    gamma: f64,
    sampling: SamplingMode,
    days: u32,
    peak_infected: u32,
}

impl TrialModel {
    /// Create a model in its initial state.
    ///
    /// `params` is expected to have passed `ModelParams::validate`.
    #[must_use]
    pub fn new(params: &ModelParams) -> Self {
        let mut model = Self {
            susceptible: 0,
            infected: 0,
            recovered: 0,
            population: params.population,
            beta: params.beta,
            gamma: params.gamma,
            sampling: params.sampling,
            days: 0,
            peak_infected: 0,
        };
        model.reset();
        model
    }

    /// Restore the initial state: one index case, everyone else susceptible.
    pub fn reset(&mut self) {
        self.susceptible = self.population.saturating_sub(1);
        self.infected = self.population - self.susceptible;
        self.recovered = 0;
        self.days = 0;
        self.peak_infected = 0;
    }

    /// Whether the trial has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.infected == 0 || self.days >= MAX_DAYS
    }

    /// Advance the trial until extinction or the day limit.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TrialOutcome {
        // The index case counts toward the peak even if it recovers on day one.
        self.peak_infected = self.peak_infected.max(self.infected);
        while !self.is_terminal() {
            self.step(rng);
        }
        TrialOutcome {
            duration: self.days,
            peak_infected: self.peak_infected,
            terminal: if self.infected == 0 {
                Terminal::Extinguished
            } else {
                Terminal::HorizonReached
            },
        }
    }

    /// Simulate a single day.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let infection_p =
            self.beta * f64::from(self.susceptible) / f64::from(self.population);

        let (new_infections, recoveries) = match self.sampling {
            SamplingMode::PerIndividual => (
                bernoulli_count(rng, self.infected, infection_p),
                bernoulli_count(rng, self.infected, self.gamma),
            ),
            SamplingMode::Binomial => (
                binomial_count(rng, self.infected, infection_p),
                binomial_count(rng, self.infected, self.gamma),
            ),
        };

        let new_infections = new_infections.min(self.susceptible);
        let recoveries = recoveries.min(self.infected);

        self.susceptible -= new_infections;
        self.infected = self.infected + new_infections - recoveries;
        self.recovered += recoveries;

        self.peak_infected = self.peak_infected.max(self.infected);
        self.days += 1;
    }

    #[must_use]
    pub fn susceptible(&self) -> u32 {
        self.susceptible
    }

    #[must_use]
    pub fn infected(&self) -> u32 {
        self.infected
    }

    #[must_use]
    pub fn recovered(&self) -> u32 {
        self.recovered
    }

    #[must_use]
    pub fn population(&self) -> u32 {
        self.population
    }

    /// Days simulated so far.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.days
    }

    #[must_use]
    pub fn peak_infected(&self) -> u32 {
        self.peak_infected
    }
}

/// Count how many of `trials` uniform draws fall below `p`.
#[allow(clippy::cast_possible_truncation)]
fn bernoulli_count<R: Rng + ?Sized>(rng: &mut R, trials: u32, p: f64) -> u32 {
    (0..trials).filter(|_| rng.random::<f64>() < p).count() as u32
}

#[allow(clippy::cast_possible_truncation)]
fn binomial_count<R: Rng + ?Sized>(rng: &mut R, trials: u32, p: f64) -> u32 {
    // p is a product of validated rates and a fraction <= 1, so construction
    // only fails for NaN, which validation rejects.
    Binomial::new(u64::from(trials), p.clamp(0.0, 1.0))
        .map_or(0, |dist| dist.sample(rng).min(u64::from(trials)) as u32)
}
