use tracing::{debug, info, warn};

use super::error::ConfigError;
use super::returns::{ReturnSource, build_return_source, monthly_fee_rate};
use super::schedule::{annual_contribution, monthly_contribution};
use super::types::{
    Configuration, ContributionTiming, Granularity, PeriodRecord, Phase, RunSummary,
    SimulationOutcome, StepSchedule, WithdrawalStrategy, WithdrawalTiming,
};
use super::withdrawal::{WithdrawalSplit, cost_ratio, desired_annual_net, gross_up};

/// Mutable state of one run. Created fresh by every call to [`simulate`].
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub balance: f64,
    pub phase: Phase,
    pub target_net: f64,
    pub cumulative_contributions: f64,
    pub cumulative_gross_withdrawn: f64,
    pub cumulative_net_withdrawn: f64,
    pub cumulative_tax_paid: f64,
    pub withdrawal_start_period: Option<u32>,
    pub negative_periods: u32,
    balance_went_negative: bool,
}

impl SimulationState {
    pub fn new(config: &Configuration) -> Self {
        Self {
            balance: config.initial_balance,
            phase: Phase::Accumulating,
            target_net: config.withdrawals.base_net,
            cumulative_contributions: 0.0,
            cumulative_gross_withdrawn: 0.0,
            cumulative_net_withdrawn: 0.0,
            cumulative_tax_paid: 0.0,
            withdrawal_start_period: None,
            negative_periods: 0,
            balance_went_negative: false,
        }
    }
}

#[derive(Debug, Default)]
struct YearAccumulator {
    contribution: f64,
    gross_withdrawal: f64,
    net_withdrawal: f64,
    growth_factor: f64,
    withdrew: bool,
}

impl YearAccumulator {
    fn new() -> Self {
        Self {
            growth_factor: 1.0,
            ..Self::default()
        }
    }

    fn record_withdrawal(&mut self, split: WithdrawalSplit) {
        self.gross_withdrawal += split.gross;
        self.net_withdrawal += split.net;
        self.withdrew = true;
    }
}

/// Runs one path, building the return source the configuration selects.
pub fn run(config: &Configuration) -> Result<SimulationOutcome, ConfigError> {
    validate_configuration(config)?;
    let mut source = build_return_source(&config.returns, config.seed)?;
    simulate(config, source.as_mut())
}

/// Runs one path against a caller-supplied return source. `config.returns`
/// and `config.seed` are not consulted.
pub fn simulate(
    config: &Configuration,
    source: &mut dyn ReturnSource,
) -> Result<SimulationOutcome, ConfigError> {
    validate_configuration(config)?;

    let mut state = SimulationState::new(config);
    let mut records = Vec::with_capacity(config.total_years as usize);

    match &config.granularity {
        Granularity::Annual => {
            for year in 1..=config.total_years {
                records.push(run_annual_period(config, &mut state, source, year));
            }
        }
        Granularity::Monthly {
            withdrawal_timing,
            contribution_timing,
        } => {
            let monthly_fee = monthly_fee_rate(config.management_fee);
            for year in 1..=config.total_years {
                records.push(run_monthly_year(
                    config,
                    &mut state,
                    source,
                    year,
                    *withdrawal_timing,
                    contribution_timing,
                    monthly_fee,
                ));
            }
        }
    }

    let outcome = build_outcome(config, &state, records);
    info!(
        years = config.total_years,
        withdrawal_start_period = ?outcome.withdrawal_start_period,
        final_balance = outcome.final_balance,
        total_net_withdrawn = outcome.total_net_withdrawn,
        "simulation finished"
    );
    Ok(outcome)
}

pub fn validate_configuration(config: &Configuration) -> Result<(), ConfigError> {
    if config.total_years == 0 {
        return Err(ConfigError::invalid("totalYears", "must be > 0"));
    }

    if !config.initial_balance.is_finite() || config.initial_balance < 0.0 {
        return Err(ConfigError::invalid(
            "initialBalance",
            "must be finite and >= 0",
        ));
    }

    let plan = &config.contributions;
    if !plan.base_monthly.is_finite() || plan.base_monthly < 0.0 {
        return Err(ConfigError::invalid(
            "contributions.baseMonthly",
            "must be finite and >= 0",
        ));
    }

    if !plan.annual_multiplier.is_finite() || plan.annual_multiplier < 0.0 {
        return Err(ConfigError::invalid(
            "contributions.annualMultiplier",
            "must be finite and >= 0",
        ));
    }

    if !plan.growth_rate.is_finite() || plan.growth_rate <= -1.0 {
        return Err(ConfigError::invalid(
            "contributions.growthRate",
            "must be finite and > -1",
        ));
    }

    if plan.step.interval_years() == 0 {
        return Err(ConfigError::invalid(
            "contributions.step.intervalYears",
            "must be > 0",
        ));
    }

    match plan.step {
        StepSchedule::StepDown { amount, floor, .. } => {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ConfigError::invalid(
                    "contributions.step.amount",
                    "must be finite and >= 0",
                ));
            }
            if !floor.is_finite() || floor < 0.0 {
                return Err(ConfigError::invalid(
                    "contributions.step.floor",
                    "must be finite and >= 0",
                ));
            }
        }
        StepSchedule::StepUp {
            amount, ceiling, ..
        } => {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ConfigError::invalid(
                    "contributions.step.amount",
                    "must be finite and >= 0",
                ));
            }
            if ceiling.is_some_and(|c| !c.is_finite() || c < 0.0) {
                return Err(ConfigError::invalid(
                    "contributions.step.ceiling",
                    "must be finite and >= 0",
                ));
            }
        }
    }

    let thresholds = &config.thresholds;
    for (field, value) in [
        ("thresholds.targetBalance", thresholds.target_balance),
        ("thresholds.minBalance", thresholds.min_balance),
        ("thresholds.upperBalance", thresholds.upper_balance),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::invalid(field, "must be finite and >= 0"));
        }
    }

    let withdrawals = &config.withdrawals;
    if !withdrawals.base_net.is_finite() || withdrawals.base_net < 0.0 {
        return Err(ConfigError::invalid(
            "withdrawals.baseNet",
            "must be finite and >= 0",
        ));
    }

    if !withdrawals.growth_rate.is_finite() || withdrawals.growth_rate <= -1.0 {
        return Err(ConfigError::invalid(
            "withdrawals.growthRate",
            "must be finite and > -1",
        ));
    }

    if let WithdrawalStrategy::PercentOfBalance { rate } = withdrawals.strategy {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::invalid(
                "withdrawals.strategy.rate",
                "must be between 0 and 1",
            ));
        }
    }

    if !(0.0..1.0).contains(&config.tax_rate) {
        return Err(ConfigError::invalid("taxRate", "must be >= 0 and < 1"));
    }

    if !(0.0..1.0).contains(&config.management_fee) {
        return Err(ConfigError::invalid("managementFee", "must be >= 0 and < 1"));
    }

    if let Granularity::Monthly {
        withdrawal_timing,
        contribution_timing,
    } = &config.granularity
    {
        if let WithdrawalTiming::OncePerYear { month } = withdrawal_timing {
            if !(1..=12).contains(month) {
                return Err(ConfigError::invalid(
                    "granularity.withdrawalTiming.month",
                    "must be between 1 and 12",
                ));
            }
        }
        if let ContributionTiming::ExtraMonths { months } = contribution_timing {
            if months.iter().any(|m| !(1..=12).contains(m)) {
                return Err(ConfigError::invalid(
                    "granularity.contributionTiming.months",
                    "must all be between 1 and 12",
                ));
            }
        }
    }

    Ok(())
}

fn run_annual_period(
    config: &Configuration,
    state: &mut SimulationState,
    source: &mut dyn ReturnSource,
    year: u32,
) -> PeriodRecord {
    let opening_balance = state.balance;

    enter_withdrawal_if_due(config, state, year);
    let scheduled = annual_contribution(&config.contributions, year);
    let contribution = apply_contribution(config, state, scheduled);

    let split = withdraw(config, state, year, 1.0);
    if split.is_some() {
        compound_target_net(config, state);
    }

    let raw = source.next_return(year);
    let effective = apply_loss_ceiling(state, source.loss_ceiling(), raw - config.management_fee);
    state.balance *= 1.0 + effective;
    note_negative_balance(state, year);

    PeriodRecord {
        period: year,
        phase: state.phase,
        opening_balance,
        contribution,
        gross_withdrawal: split.map_or(0.0, |s| s.gross),
        net_withdrawal: split.map_or(0.0, |s| s.net),
        effective_return_pct: effective * 100.0,
        closing_balance: state.balance,
    }
}

fn run_monthly_year(
    config: &Configuration,
    state: &mut SimulationState,
    source: &mut dyn ReturnSource,
    year: u32,
    withdrawal_timing: WithdrawalTiming,
    contribution_timing: &ContributionTiming,
    monthly_fee: f64,
) -> PeriodRecord {
    let opening_balance = state.balance;
    let mut acc = YearAccumulator::new();
    let mut opening_phase = None;

    for month_of_year in 1..=12u8 {
        let month = (year - 1) * 12 + u32::from(month_of_year - 1);

        enter_withdrawal_if_due(config, state, year);
        opening_phase.get_or_insert(state.phase);
        let scheduled =
            monthly_contribution(&config.contributions, contribution_timing, year, month_of_year);
        acc.contribution += apply_contribution(config, state, scheduled);

        let fraction = match withdrawal_timing {
            WithdrawalTiming::EveryMonth => Some(1.0 / 12.0),
            WithdrawalTiming::OncePerYear { month } if month == month_of_year => Some(1.0),
            WithdrawalTiming::OncePerYear { .. } => None,
        };
        if let Some(split) = fraction.and_then(|f| withdraw(config, state, year, f)) {
            acc.record_withdrawal(split);
        }

        let raw = source.next_monthly_return(month);
        let factor = (1.0 + raw) * (1.0 + monthly_fee);
        let effective = apply_loss_ceiling(state, source.loss_ceiling(), factor - 1.0);
        state.balance *= 1.0 + effective;
        acc.growth_factor *= 1.0 + effective;
    }

    if acc.withdrew {
        compound_target_net(config, state);
    }
    note_negative_balance(state, year);

    PeriodRecord {
        period: year,
        phase: opening_phase.unwrap_or(state.phase),
        opening_balance,
        contribution: acc.contribution,
        gross_withdrawal: acc.gross_withdrawal,
        net_withdrawal: acc.net_withdrawal,
        effective_return_pct: (acc.growth_factor - 1.0) * 100.0,
        closing_balance: state.balance,
    }
}

fn enter_withdrawal_if_due(config: &Configuration, state: &mut SimulationState, year: u32) {
    if state.phase == Phase::Accumulating && state.balance >= config.thresholds.target_balance {
        state.phase = Phase::Withdrawing;
        state.withdrawal_start_period = Some(year);
        state.target_net = config.withdrawals.base_net;
        debug!(year, balance = state.balance, "entering withdrawal phase");
    }
}

/// Adds the scheduled contribution when the phase allows it and returns the
/// amount actually applied.
fn apply_contribution(config: &Configuration, state: &mut SimulationState, scheduled: f64) -> f64 {
    let applies = match state.phase {
        Phase::Accumulating => true,
        Phase::Withdrawing => config.contributions.continue_during_withdrawal,
    };
    if !applies {
        return 0.0;
    }

    state.balance += scheduled;
    state.cumulative_contributions += scheduled;
    scheduled
}

/// Draws `fraction` of this year's desired net, grossed up for tax. Returns
/// `None` outside the withdrawal phase or while paused below the minimum.
fn withdraw(
    config: &Configuration,
    state: &mut SimulationState,
    year: u32,
    fraction: f64,
) -> Option<WithdrawalSplit> {
    if state.phase != Phase::Withdrawing {
        return None;
    }

    if state.balance < config.thresholds.min_balance {
        debug!(
            year,
            balance = state.balance,
            min_balance = config.thresholds.min_balance,
            "withdrawal paused below minimum balance"
        );
        return None;
    }

    let desired = desired_annual_net(
        config.withdrawals.strategy,
        state.target_net,
        state.balance,
        &config.thresholds,
    ) * fraction;
    let ratio = cost_ratio(state.cumulative_contributions, state.balance);
    let split = gross_up(desired, ratio, config.tax_rate);

    state.balance -= split.gross;
    state.cumulative_gross_withdrawn += split.gross;
    state.cumulative_net_withdrawn += split.net;
    state.cumulative_tax_paid += split.tax;
    Some(split)
}

fn compound_target_net(config: &Configuration, state: &mut SimulationState) {
    if config.withdrawals.strategy == WithdrawalStrategy::FixedNetAmount {
        state.target_net *= 1.0 + config.withdrawals.growth_rate;
    }
}

fn apply_loss_ceiling(state: &mut SimulationState, ceiling: Option<u32>, effective: f64) -> f64 {
    let Some(limit) = ceiling else {
        return effective;
    };
    if effective >= 0.0 {
        return effective;
    }

    if state.negative_periods < limit {
        state.negative_periods += 1;
        effective
    } else {
        0.0
    }
}

fn note_negative_balance(state: &mut SimulationState, year: u32) {
    if state.balance < 0.0 && !state.balance_went_negative {
        state.balance_went_negative = true;
        warn!(year, balance = state.balance, "portfolio balance went negative");
    }
}

fn build_outcome(
    config: &Configuration,
    state: &SimulationState,
    records: Vec<PeriodRecord>,
) -> SimulationOutcome {
    let final_balance = records
        .last()
        .map_or(config.initial_balance, |r| r.closing_balance);

    let summary = RunSummary {
        withdrawal_start_period: state.withdrawal_start_period,
        total_contributions: state.cumulative_contributions,
        total_gross_withdrawn: state.cumulative_gross_withdrawn,
        total_net_withdrawn: state.cumulative_net_withdrawn,
        total_tax_paid: state.cumulative_tax_paid,
        final_balance,
        total_gain: final_balance - config.initial_balance - state.cumulative_contributions
            + state.cumulative_gross_withdrawn,
    };

    SimulationOutcome {
        records,
        withdrawal_start_period: state.withdrawal_start_period,
        total_net_withdrawn: state.cumulative_net_withdrawn,
        final_balance,
        summary,
    }
}
