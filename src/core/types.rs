use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Accumulating,
    Withdrawing,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WithdrawalStrategy {
    /// Withdraw the current target net amount, doubled at or above the upper balance.
    FixedNetAmount,
    /// Withdraw `rate * balance` net, recomputed every withdrawal event.
    PercentOfBalance { rate: f64 },
}

/// Rule that moves the nominal monthly contribution at fixed year intervals.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StepSchedule {
    #[serde(rename_all = "camelCase")]
    StepDown {
        interval_years: u32,
        amount: f64,
        floor: f64,
    },
    #[serde(rename_all = "camelCase")]
    StepUp {
        interval_years: u32,
        amount: f64,
        ceiling: Option<f64>,
    },
}

impl StepSchedule {
    pub fn interval_years(&self) -> u32 {
        match self {
            StepSchedule::StepDown { interval_years, .. }
            | StepSchedule::StepUp { interval_years, .. } => *interval_years,
        }
    }
}

/// When the withdrawal money movement happens in monthly-step runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WithdrawalTiming {
    /// One twelfth of the annual desired net every month.
    EveryMonth,
    /// The full annual desired net once, in the given calendar month (1..=12).
    OncePerYear { month: u8 },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContributionTiming {
    /// `stepped * annual_multiplier / 12` every month.
    ProRata,
    /// The stepped amount every month plus one extra payment in each listed month.
    ExtraMonths { months: Vec<u8> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Granularity {
    Annual,
    #[serde(rename_all = "camelCase")]
    Monthly {
        withdrawal_timing: WithdrawalTiming,
        contribution_timing: ContributionTiming,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnFrequency {
    Annual,
    Monthly,
}

/// Return-source selector. Historical sequences are percentages (26.29 = 26.29%);
/// `None` selects the built-in S&P 500 tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ReturnModel {
    #[serde(rename_all = "camelCase")]
    Stochastic {
        mean: f64,
        std_dev: f64,
        #[serde(default = "default_return_frequency")]
        input_frequency: ReturnFrequency,
        #[serde(default)]
        loss_ceiling: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    HistoricalAnnual {
        #[serde(default)]
        returns: Option<Vec<f64>>,
    },
    #[serde(rename_all = "camelCase")]
    HistoricalMonthly {
        #[serde(default)]
        monthly: Option<Vec<f64>>,
        #[serde(default)]
        annual_fallback: Option<Vec<f64>>,
    },
}

fn default_return_frequency() -> ReturnFrequency {
    ReturnFrequency::Annual
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPlan {
    pub base_monthly: f64,
    pub annual_multiplier: f64,
    pub growth_rate: f64,
    pub step: StepSchedule,
    pub continue_during_withdrawal: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseThresholds {
    pub target_balance: f64,
    pub min_balance: f64,
    pub upper_balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPlan {
    pub strategy: WithdrawalStrategy,
    pub base_net: f64,
    pub growth_rate: f64,
}

/// Everything one run needs. Rates are decimals (0.198 = 19.8%).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    pub total_years: u32,
    pub initial_balance: f64,
    pub contributions: ContributionPlan,
    pub thresholds: PhaseThresholds,
    pub withdrawals: WithdrawalPlan,
    pub tax_rate: f64,
    pub management_fee: f64,
    pub returns: ReturnModel,
    pub granularity: Granularity,
    pub seed: Option<u64>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            total_years: 55,
            initial_balance: 20_000.0,
            contributions: ContributionPlan {
                base_monthly: 200.0,
                annual_multiplier: 14.0,
                growth_rate: 0.0,
                step: StepSchedule::StepUp {
                    interval_years: 5,
                    amount: 100.0,
                    ceiling: None,
                },
                continue_during_withdrawal: false,
            },
            thresholds: PhaseThresholds {
                target_balance: 400_000.0,
                min_balance: 300_000.0,
                upper_balance: 600_000.0,
            },
            withdrawals: WithdrawalPlan {
                strategy: WithdrawalStrategy::FixedNetAmount,
                base_net: 20_000.0,
                growth_rate: 0.0,
            },
            tax_rate: 0.198,
            management_fee: 0.005,
            returns: ReturnModel::Stochastic {
                mean: 0.07,
                std_dev: 0.15,
                input_frequency: ReturnFrequency::Annual,
                loss_ceiling: None,
            },
            granularity: Granularity::Annual,
            seed: None,
        }
    }
}

/// One reporting year. Monthly-step runs are aggregated into these too.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub period: u32,
    pub phase: Phase,
    pub opening_balance: f64,
    pub contribution: f64,
    pub gross_withdrawal: f64,
    pub net_withdrawal: f64,
    pub effective_return_pct: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub withdrawal_start_period: Option<u32>,
    pub total_contributions: f64,
    pub total_gross_withdrawn: f64,
    pub total_net_withdrawn: f64,
    pub total_tax_paid: f64,
    pub final_balance: f64,
    pub total_gain: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub records: Vec<PeriodRecord>,
    pub withdrawal_start_period: Option<u32>,
    pub total_net_withdrawn: f64,
    pub final_balance: f64,
    pub summary: RunSummary,
}
