mod engine;
mod error;
mod history;
mod returns;
mod schedule;
mod types;
mod withdrawal;

pub use engine::{SimulationState, run, simulate, validate_configuration};
pub use error::ConfigError;
pub use history::{SP500_ANNUAL, SP500_MONTHLY};
pub use returns::{
    HistoricalAnnual, HistoricalMonthly, ReturnSource, StochasticReturns, build_return_source,
};
pub use schedule::{annual_contribution, monthly_contribution, stepped_monthly_contribution};
pub use types::{
    Configuration, ContributionPlan, ContributionTiming, Granularity, PeriodRecord, Phase,
    PhaseThresholds, ReturnFrequency, ReturnModel, RunSummary, SimulationOutcome, StepSchedule,
    WithdrawalPlan, WithdrawalStrategy, WithdrawalTiming,
};
pub use withdrawal::{WithdrawalSplit, cost_ratio, desired_annual_net, gross_up};
