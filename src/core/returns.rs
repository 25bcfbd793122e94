//! Pluggable market return sources.
//!
//! Every source answers two questions: the raw return for a reporting year
//! (annual-step runs) and the raw return for an absolute month (monthly-step
//! runs). Returns are decimals before management fees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use super::error::ConfigError;
use super::history::{SP500_ANNUAL, SP500_MONTHLY};
use super::types::{ReturnFrequency, ReturnModel};

pub trait ReturnSource {
    /// Raw return for the 1-based reporting year `period`.
    fn next_return(&mut self, period: u32) -> f64;

    /// Raw return for the 0-based absolute month `month`.
    fn next_monthly_return(&mut self, month: u32) -> f64;

    /// Number of negative effective periods after which further losses are
    /// clamped to zero.
    fn loss_ceiling(&self) -> Option<u32> {
        None
    }
}

pub(crate) fn annual_to_monthly_rate(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Equivalent monthly multiplicative fee rate; negative for a positive fee.
pub(crate) fn monthly_fee_rate(annual_fee: f64) -> f64 {
    (1.0 - annual_fee).powf(1.0 / 12.0) - 1.0
}

/// Normally distributed returns drawn from an explicit generator handle.
pub struct StochasticReturns<R> {
    annual: Normal<f64>,
    monthly: Normal<f64>,
    loss_ceiling: Option<u32>,
    rng: R,
}

impl<R: Rng> StochasticReturns<R> {
    pub fn new(
        mean: f64,
        std_dev: f64,
        input_frequency: ReturnFrequency,
        loss_ceiling: Option<u32>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        if !mean.is_finite() || mean <= -1.0 {
            return Err(ConfigError::invalid("returns.mean", "must be finite and > -1"));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ConfigError::invalid("returns.stdDev", "must be finite and >= 0"));
        }

        let (annual_mean, annual_std, monthly_mean, monthly_std) = match input_frequency {
            ReturnFrequency::Annual => (
                mean,
                std_dev,
                annual_to_monthly_rate(mean),
                std_dev / 12f64.sqrt(),
            ),
            ReturnFrequency::Monthly => (
                (1.0 + mean).powi(12) - 1.0,
                std_dev * 12f64.sqrt(),
                mean,
                std_dev,
            ),
        };

        let annual = Normal::new(annual_mean, annual_std)
            .map_err(|e| ConfigError::invalid("returns.stdDev", e.to_string()))?;
        let monthly = Normal::new(monthly_mean, monthly_std)
            .map_err(|e| ConfigError::invalid("returns.stdDev", e.to_string()))?;

        Ok(Self {
            annual,
            monthly,
            loss_ceiling,
            rng,
        })
    }
}

impl<R: Rng> ReturnSource for StochasticReturns<R> {
    fn next_return(&mut self, _period: u32) -> f64 {
        self.annual.sample(&mut self.rng)
    }

    fn next_monthly_return(&mut self, _month: u32) -> f64 {
        self.monthly.sample(&mut self.rng)
    }

    fn loss_ceiling(&self) -> Option<u32> {
        self.loss_ceiling
    }
}

/// Fixed annual sequence in percent, cycled when the run outlasts it.
#[derive(Debug, Clone)]
pub struct HistoricalAnnual {
    returns: Vec<f64>,
}

impl HistoricalAnnual {
    pub fn new(returns: Vec<f64>) -> Result<Self, ConfigError> {
        validate_sequence("returns.returns", &returns)?;
        Ok(Self { returns })
    }

    pub fn sp500() -> Self {
        Self {
            returns: SP500_ANNUAL.to_vec(),
        }
    }

    fn rate_for_year_index(&self, year_index: u32) -> f64 {
        self.returns[year_index as usize % self.returns.len()] / 100.0
    }
}

impl ReturnSource for HistoricalAnnual {
    fn next_return(&mut self, period: u32) -> f64 {
        self.rate_for_year_index(period.saturating_sub(1))
    }

    fn next_monthly_return(&mut self, month: u32) -> f64 {
        annual_to_monthly_rate(self.rate_for_year_index(month / 12))
    }
}

/// Fixed monthly sequence in percent. Months past the end fall back to the
/// annual table, converted to an equivalent monthly rate.
#[derive(Debug, Clone)]
pub struct HistoricalMonthly {
    monthly: Vec<f64>,
    fallback: HistoricalAnnual,
}

impl HistoricalMonthly {
    pub fn new(monthly: Vec<f64>, fallback: HistoricalAnnual) -> Result<Self, ConfigError> {
        validate_sequence("returns.monthly", &monthly)?;
        Ok(Self { monthly, fallback })
    }

    pub fn sp500() -> Self {
        Self {
            monthly: SP500_MONTHLY.to_vec(),
            fallback: HistoricalAnnual::sp500(),
        }
    }

    fn monthly_rate(&mut self, month: u32) -> f64 {
        match self.monthly.get(month as usize) {
            Some(pct) => pct / 100.0,
            None => self.fallback.next_monthly_return(month),
        }
    }
}

impl ReturnSource for HistoricalMonthly {
    fn next_return(&mut self, period: u32) -> f64 {
        let first_month = period.saturating_sub(1) * 12;
        let factor = (first_month..first_month + 12)
            .map(|m| 1.0 + self.monthly_rate(m))
            .product::<f64>();
        factor - 1.0
    }

    fn next_monthly_return(&mut self, month: u32) -> f64 {
        self.monthly_rate(month)
    }
}

fn validate_sequence(field: &'static str, values: &[f64]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::invalid(field, "must contain only finite values"));
    }
    Ok(())
}

/// Builds the source a configuration selects. Stochastic sources get a
/// `StdRng` seeded from `seed`, or from the OS when no seed is given.
pub fn build_return_source(
    model: &ReturnModel,
    seed: Option<u64>,
) -> Result<Box<dyn ReturnSource>, ConfigError> {
    match model {
        ReturnModel::Stochastic {
            mean,
            std_dev,
            input_frequency,
            loss_ceiling,
        } => {
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let source =
                StochasticReturns::new(*mean, *std_dev, *input_frequency, *loss_ceiling, rng)?;
            Ok(Box::new(source))
        }
        ReturnModel::HistoricalAnnual { returns } => {
            let source = match returns {
                Some(values) => HistoricalAnnual::new(values.clone())?,
                None => HistoricalAnnual::sp500(),
            };
            Ok(Box::new(source))
        }
        ReturnModel::HistoricalMonthly {
            monthly,
            annual_fallback,
        } => {
            let fallback = match annual_fallback {
                Some(values) => HistoricalAnnual::new(values.clone())?,
                None => HistoricalAnnual::sp500(),
            };
            let source = match monthly {
                Some(values) => HistoricalMonthly::new(values.clone(), fallback)?,
                None => HistoricalMonthly::new(SP500_MONTHLY.to_vec(), fallback)?,
            };
            Ok(Box::new(source))
        }
    }
}
