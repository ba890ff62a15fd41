//! Model parameters and validation.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BETA, DEFAULT_GAMMA, DEFAULT_POPULATION};
use crate::error::SimError;

/// How the per-day infection and recovery counts are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingMode {
    /// One uniform draw per infected individual per event, O(I) per day.
    #[default]
    PerIndividual,
    /// One binomial draw per event per day, O(1) per day.
    Binomial,
}

impl SamplingMode {
    /// Parse a mode name as accepted on the command line.
    pub fn parse(name: &str) -> Result<Self, SimError> {
        match name {
            "per-individual" | "bernoulli" => Ok(Self::PerIndividual),
            "binomial" => Ok(Self::Binomial),
            other => Err(SimError::InvalidConfiguration(format!(
                "unknown sampling mode: {other}"
            ))),
        }
    }

    /// Get the canonical name of this mode.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PerIndividual => "per-individual",
            Self::Binomial => "binomial",
        }
    }
}

/// Fixed parameters shared by every trial of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Total population N.
    pub population: u32,
    /// Transmission rate.
    pub beta: f64,
    /// Recovery rate.
    pub gamma: f64,
    /// Sampling mode for daily transitions.
    #[serde(default)]
    pub sampling: SamplingMode,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            sampling: SamplingMode::PerIndividual,
        }
    }
}

impl ModelParams {
    /// Create parameters with the default sampling mode.
    #[must_use]
    pub fn new(population: u32, beta: f64, gamma: f64) -> Self {
        Self {
            population,
            beta,
            gamma,
            sampling: SamplingMode::PerIndividual,
        }
    }

    /// Select a sampling mode.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Check the population and both rates.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.population == 0 {
            return Err(SimError::InvalidConfiguration(
                "population must be positive".into(),
            ));
        }
        check_rate("beta", self.beta)?;
        check_rate("gamma", self.gamma)
    }
}

fn check_rate(name: &str, value: f64) -> Result<(), SimError> {
    // NaN fails `contains`, so it is rejected here too.
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::InvalidConfiguration(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = ModelParams::default();
        assert_eq!(params.population, DEFAULT_POPULATION);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_population_rejected() {
        let params = ModelParams::new(0, 0.3, 0.1);
        assert!(matches!(
            params.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn out_of_range_rates_rejected() {
        for (beta, gamma) in [(-0.1, 0.1), (1.5, 0.1), (0.3, -0.01), (0.3, 1.01)] {
            let params = ModelParams::new(1000, beta, gamma);
            assert!(params.validate().is_err(), "beta={beta} gamma={gamma}");
        }
    }

    #[test]
    fn non_finite_rates_rejected() {
        assert!(ModelParams::new(1000, f64::NAN, 0.1).validate().is_err());
        assert!(ModelParams::new(1000, 0.3, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn boundary_rates_accepted() {
        assert!(ModelParams::new(1, 0.0, 0.0).validate().is_ok());
        assert!(ModelParams::new(1, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn sampling_mode_parse() {
        assert_eq!(
            SamplingMode::parse("per-individual"),
            Ok(SamplingMode::PerIndividual)
        );
        assert_eq!(SamplingMode::parse("binomial"), Ok(SamplingMode::Binomial));
        assert!(SamplingMode::parse("poisson").is_err());
        assert_eq!(SamplingMode::Binomial.name(), "binomial");
    }

    #[test]
    fn params_serialization() {
        let params = ModelParams::default().with_sampling(SamplingMode::Binomial);
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"binomial\""));
        let back: ModelParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn sampling_defaults_when_missing() {
        let json = r#"{"population":500,"beta":0.2,"gamma":0.05}"#;
        let params: ModelParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.sampling, SamplingMode::PerIndividual);
    }
}
