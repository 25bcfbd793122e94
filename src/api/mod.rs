use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{
    Configuration, ContributionPlan, ContributionTiming, Granularity, PeriodRecord,
    PhaseThresholds, ReturnFrequency, ReturnModel, RunSummary, StepSchedule, WithdrawalPlan,
    WithdrawalStrategy, WithdrawalTiming, run, validate_configuration,
};

const MAX_PATHS: u32 = 10_000;
const MAX_YEARS: u32 = 1_000;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliStepDirection {
    Down,
    Up,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliWithdrawalStrategy {
    FixedNet,
    PercentOfBalance,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliReturnModel {
    Stochastic,
    HistoricalAnnual,
    HistoricalMonthly,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGranularity {
    Annual,
    Monthly,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliWithdrawalTiming {
    EveryMonth,
    OncePerYear,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliContributionTiming {
    ProRata,
    ExtraMonths,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiStepDirection {
    #[serde(alias = "stepDown", alias = "step-down")]
    Down,
    #[serde(alias = "stepUp", alias = "step-up")]
    Up,
}

impl From<ApiStepDirection> for CliStepDirection {
    fn from(value: ApiStepDirection) -> Self {
        match value {
            ApiStepDirection::Down => CliStepDirection::Down,
            ApiStepDirection::Up => CliStepDirection::Up,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiWithdrawalStrategy {
    #[serde(alias = "fixedNet", alias = "fixed", alias = "fixed-net-amount")]
    FixedNet,
    #[serde(alias = "percentOfBalance", alias = "percent")]
    PercentOfBalance,
}

impl From<ApiWithdrawalStrategy> for CliWithdrawalStrategy {
    fn from(value: ApiWithdrawalStrategy) -> Self {
        match value {
            ApiWithdrawalStrategy::FixedNet => CliWithdrawalStrategy::FixedNet,
            ApiWithdrawalStrategy::PercentOfBalance => CliWithdrawalStrategy::PercentOfBalance,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiReturnModel {
    #[serde(alias = "random")]
    Stochastic,
    #[serde(alias = "historicalAnnual", alias = "historical")]
    HistoricalAnnual,
    #[serde(alias = "historicalMonthly")]
    HistoricalMonthly,
}

impl From<ApiReturnModel> for CliReturnModel {
    fn from(value: ApiReturnModel) -> Self {
        match value {
            ApiReturnModel::Stochastic => CliReturnModel::Stochastic,
            ApiReturnModel::HistoricalAnnual => CliReturnModel::HistoricalAnnual,
            ApiReturnModel::HistoricalMonthly => CliReturnModel::HistoricalMonthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiGranularity {
    #[serde(alias = "yearly")]
    Annual,
    Monthly,
}

impl From<ApiGranularity> for CliGranularity {
    fn from(value: ApiGranularity) -> Self {
        match value {
            ApiGranularity::Annual => CliGranularity::Annual,
            ApiGranularity::Monthly => CliGranularity::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiWithdrawalTiming {
    #[serde(alias = "everyMonth", alias = "monthly")]
    EveryMonth,
    #[serde(alias = "oncePerYear", alias = "annual")]
    OncePerYear,
}

impl From<ApiWithdrawalTiming> for CliWithdrawalTiming {
    fn from(value: ApiWithdrawalTiming) -> Self {
        match value {
            ApiWithdrawalTiming::EveryMonth => CliWithdrawalTiming::EveryMonth,
            ApiWithdrawalTiming::OncePerYear => CliWithdrawalTiming::OncePerYear,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiContributionTiming {
    #[serde(alias = "proRata", alias = "pro_rata")]
    ProRata,
    #[serde(alias = "extraMonths", alias = "extra_months")]
    ExtraMonths,
}

impl From<ApiContributionTiming> for CliContributionTiming {
    fn from(value: ApiContributionTiming) -> Self {
        match value {
            ApiContributionTiming::ProRata => CliContributionTiming::ProRata,
            ApiContributionTiming::ExtraMonths => CliContributionTiming::ExtraMonths,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    years: Option<u32>,
    initial_balance: Option<f64>,
    seed: Option<u64>,
    paths: Option<u32>,

    monthly_contribution: Option<f64>,
    contribution_multiplier: Option<f64>,
    contribution_growth: Option<f64>,
    step_direction: Option<ApiStepDirection>,
    step_interval_years: Option<u32>,
    step_amount: Option<f64>,
    step_floor: Option<f64>,
    step_ceiling: Option<f64>,
    contribute_during_withdrawal: Option<bool>,

    target_balance: Option<f64>,
    min_balance: Option<f64>,
    upper_balance: Option<f64>,

    withdrawal_strategy: Option<ApiWithdrawalStrategy>,
    withdrawal_amount: Option<f64>,
    withdrawal_rate: Option<f64>,
    withdrawal_growth: Option<f64>,
    tax_rate: Option<f64>,
    management_fee: Option<f64>,

    return_model: Option<ApiReturnModel>,
    mean_return: Option<f64>,
    return_volatility: Option<f64>,
    monthly_return_inputs: Option<bool>,
    loss_ceiling: Option<u32>,
    #[serde(deserialize_with = "list_or_csv")]
    historical_returns: Option<Vec<f64>>,
    #[serde(deserialize_with = "list_or_csv")]
    monthly_returns: Option<Vec<f64>>,

    granularity: Option<ApiGranularity>,
    withdrawal_timing: Option<ApiWithdrawalTiming>,
    withdrawal_month: Option<u8>,
    contribution_timing: Option<ApiContributionTiming>,
    #[serde(deserialize_with = "list_or_csv")]
    extra_months: Option<Vec<u8>>,
}

/// Accepts a JSON array or a comma-separated string, so list fields also
/// work from a GET query string.
fn list_or_csv<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv<T> {
        List(Vec<T>),
        Csv(String),
    }

    match Option::<ListOrCsv<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ListOrCsv::List(values)) => Ok(Some(values)),
        Some(ListOrCsv::Csv(text)) => text
            .split(',')
            .map(|part| part.trim().parse::<T>().map_err(de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Portfolio lifecycle simulator (accumulation, threshold-triggered withdrawals, capital-gains tax)"
)]
struct Cli {
    #[arg(long, default_value_t = 55, help = "Number of reporting years to simulate")]
    years: u32,
    #[arg(long, default_value_t = 20000.0)]
    initial_balance: f64,
    #[arg(long, help = "Seed for stochastic returns; random when omitted")]
    seed: Option<u64>,
    #[arg(
        long,
        default_value_t = 1,
        help = "Independent stochastic paths to run; each reports its own summary"
    )]
    paths: u32,
    #[arg(long, default_value_t = 200.0, help = "Base monthly contribution")]
    monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 14.0,
        help = "Monthly payments per year in annual runs and pro-rata monthly runs"
    )]
    contribution_multiplier: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual contribution growth in percent, compounded per year"
    )]
    contribution_growth_rate: f64,
    #[arg(long, value_enum, default_value_t = CliStepDirection::Up)]
    step_direction: CliStepDirection,
    #[arg(long, default_value_t = 5, help = "Years between contribution steps")]
    step_interval_years: u32,
    #[arg(long, default_value_t = 100.0, help = "Change of the monthly contribution per step")]
    step_amount: f64,
    #[arg(long, default_value_t = 0.0, help = "Lowest monthly contribution when stepping down")]
    step_floor: f64,
    #[arg(long, help = "Highest monthly contribution when stepping up")]
    step_ceiling: Option<f64>,
    #[arg(long, default_value_t = false)]
    contribute_during_withdrawal: bool,
    #[arg(long, default_value_t = 400000.0, help = "Balance that starts the withdrawal phase")]
    target_balance: f64,
    #[arg(long, default_value_t = 300000.0, help = "Balance below which withdrawals pause")]
    min_balance: f64,
    #[arg(
        long,
        default_value_t = 600000.0,
        help = "Balance at or above which fixed withdrawals double"
    )]
    upper_balance: f64,
    #[arg(long, value_enum, default_value_t = CliWithdrawalStrategy::FixedNet)]
    withdrawal_strategy: CliWithdrawalStrategy,
    #[arg(long, default_value_t = 20000.0, help = "Annual net withdrawal for fixed-net")]
    withdrawal_amount: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Net withdrawal as percent of balance for percent-of-balance"
    )]
    withdrawal_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Growth of the fixed net withdrawal in percent per withdrawal year"
    )]
    withdrawal_growth_rate: f64,
    #[arg(long, default_value_t = 19.8, help = "Capital-gains tax rate in percent")]
    tax_rate: f64,
    #[arg(long, default_value_t = 0.5, help = "Annual management fee in percent")]
    management_fee: f64,
    #[arg(long, value_enum, default_value_t = CliReturnModel::Stochastic)]
    return_model: CliReturnModel,
    #[arg(long, default_value_t = 7.0, help = "Mean return in percent")]
    mean_return: f64,
    #[arg(long, default_value_t = 15.0, help = "Return volatility in percent")]
    return_volatility: f64,
    #[arg(
        long,
        default_value_t = false,
        help = "Treat mean and volatility as monthly figures"
    )]
    monthly_return_inputs: bool,
    #[arg(
        long,
        help = "Number of losing periods after which further losses are clamped to zero"
    )]
    loss_ceiling: Option<u32>,
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        help = "Annual returns in percent, cycled; defaults to the built-in S&P 500 table"
    )]
    historical_returns: Vec<f64>,
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        help = "Monthly returns in percent; defaults to the built-in S&P 500 table"
    )]
    monthly_returns: Vec<f64>,
    #[arg(long, value_enum, default_value_t = CliGranularity::Annual)]
    granularity: CliGranularity,
    #[arg(long, value_enum, default_value_t = CliWithdrawalTiming::EveryMonth)]
    withdrawal_timing: CliWithdrawalTiming,
    #[arg(long, default_value_t = 1, help = "Calendar month for once-per-year withdrawals")]
    withdrawal_month: u8,
    #[arg(long, value_enum, default_value_t = CliContributionTiming::ProRata)]
    contribution_timing: CliContributionTiming,
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [6u8, 12u8],
        help = "Months that receive an extra contribution with --contribution-timing=extra-months"
    )]
    extra_months: Vec<u8>,
}

#[derive(Debug)]
struct ApiRequest {
    config: Configuration,
    paths: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct PathSummary {
    path: u32,
    seed: u64,
    #[serde(flatten)]
    summary: RunSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    seed: Option<u64>,
    withdrawal_start_period: Option<u32>,
    total_net_withdrawn: f64,
    final_balance: f64,
    summary: RunSummary,
    records: Vec<PeriodRecord>,
    paths: Vec<PathSummary>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_request(cli: Cli) -> Result<ApiRequest, String> {
    if cli.years == 0 || cli.years > MAX_YEARS {
        return Err(format!("--years must be between 1 and {MAX_YEARS}"));
    }

    if cli.paths == 0 || cli.paths > MAX_PATHS {
        return Err(format!("--paths must be between 1 and {MAX_PATHS}"));
    }

    if cli.paths > 1 && cli.return_model != CliReturnModel::Stochastic {
        return Err("--paths > 1 requires --return-model=stochastic".to_string());
    }

    if !cli.initial_balance.is_finite() || cli.initial_balance < 0.0 {
        return Err("--initial-balance must be >= 0".to_string());
    }

    if !(0.0..100.0).contains(&cli.tax_rate) {
        return Err("--tax-rate must be >= 0 and < 100".to_string());
    }

    if !(0.0..100.0).contains(&cli.management_fee) {
        return Err("--management-fee must be >= 0 and < 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.withdrawal_rate) {
        return Err("--withdrawal-rate must be between 0 and 100".to_string());
    }

    for (name, rate) in [
        ("--contribution-growth-rate", cli.contribution_growth_rate),
        ("--withdrawal-growth-rate", cli.withdrawal_growth_rate),
        ("--mean-return", cli.mean_return),
    ] {
        if !rate.is_finite() || rate <= -100.0 {
            return Err(format!("{name} must be > -100"));
        }
    }

    if !cli.return_volatility.is_finite() || cli.return_volatility < 0.0 {
        return Err("--return-volatility must be >= 0".to_string());
    }

    if cli.step_interval_years == 0 {
        return Err("--step-interval-years must be > 0".to_string());
    }

    if !(1..=12).contains(&cli.withdrawal_month) {
        return Err("--withdrawal-month must be between 1 and 12".to_string());
    }

    if cli.extra_months.iter().any(|m| !(1..=12).contains(m)) {
        return Err("--extra-months must all be between 1 and 12".to_string());
    }

    let step = match cli.step_direction {
        CliStepDirection::Down => StepSchedule::StepDown {
            interval_years: cli.step_interval_years,
            amount: cli.step_amount,
            floor: cli.step_floor,
        },
        CliStepDirection::Up => StepSchedule::StepUp {
            interval_years: cli.step_interval_years,
            amount: cli.step_amount,
            ceiling: cli.step_ceiling,
        },
    };

    let strategy = match cli.withdrawal_strategy {
        CliWithdrawalStrategy::FixedNet => WithdrawalStrategy::FixedNetAmount,
        CliWithdrawalStrategy::PercentOfBalance => WithdrawalStrategy::PercentOfBalance {
            rate: cli.withdrawal_rate / 100.0,
        },
    };

    let returns = match cli.return_model {
        CliReturnModel::Stochastic => ReturnModel::Stochastic {
            mean: cli.mean_return / 100.0,
            std_dev: cli.return_volatility / 100.0,
            input_frequency: if cli.monthly_return_inputs {
                ReturnFrequency::Monthly
            } else {
                ReturnFrequency::Annual
            },
            loss_ceiling: cli.loss_ceiling,
        },
        CliReturnModel::HistoricalAnnual => ReturnModel::HistoricalAnnual {
            returns: non_empty(cli.historical_returns),
        },
        CliReturnModel::HistoricalMonthly => ReturnModel::HistoricalMonthly {
            monthly: non_empty(cli.monthly_returns),
            annual_fallback: non_empty(cli.historical_returns),
        },
    };

    let granularity = match cli.granularity {
        CliGranularity::Annual => Granularity::Annual,
        CliGranularity::Monthly => Granularity::Monthly {
            withdrawal_timing: match cli.withdrawal_timing {
                CliWithdrawalTiming::EveryMonth => WithdrawalTiming::EveryMonth,
                CliWithdrawalTiming::OncePerYear => WithdrawalTiming::OncePerYear {
                    month: cli.withdrawal_month,
                },
            },
            contribution_timing: match cli.contribution_timing {
                CliContributionTiming::ProRata => ContributionTiming::ProRata,
                CliContributionTiming::ExtraMonths => ContributionTiming::ExtraMonths {
                    months: cli.extra_months,
                },
            },
        },
    };

    let config = Configuration {
        total_years: cli.years,
        initial_balance: cli.initial_balance,
        contributions: ContributionPlan {
            base_monthly: cli.monthly_contribution,
            annual_multiplier: cli.contribution_multiplier,
            growth_rate: cli.contribution_growth_rate / 100.0,
            step,
            continue_during_withdrawal: cli.contribute_during_withdrawal,
        },
        thresholds: PhaseThresholds {
            target_balance: cli.target_balance,
            min_balance: cli.min_balance,
            upper_balance: cli.upper_balance,
        },
        withdrawals: WithdrawalPlan {
            strategy,
            base_net: cli.withdrawal_amount,
            growth_rate: cli.withdrawal_growth_rate / 100.0,
        },
        tax_rate: cli.tax_rate / 100.0,
        management_fee: cli.management_fee / 100.0,
        returns,
        granularity,
        seed: cli.seed,
    };
    validate_configuration(&config).map_err(|e| e.to_string())?;

    Ok(ApiRequest {
        config,
        paths: cli.paths,
    })
}

fn non_empty(values: Vec<f64>) -> Option<Vec<f64>> {
    if values.is_empty() { None } else { Some(values) }
}

/// Parses simulation flags, runs the request and returns the JSON response.
/// The first item of `args` is taken as the program name.
pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    let request = build_request(cli)?;
    let response = run_request(&request)?;
    serde_json::to_string_pretty(&response).map_err(|e| format!("failed to encode response: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "simulation HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/api/simulate");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            debug!(error = %msg, "rejected simulate request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match run_request(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn run_request(request: &ApiRequest) -> Result<SimulateResponse, String> {
    if request.paths <= 1 {
        let outcome = run(&request.config).map_err(|e| e.to_string())?;
        return Ok(SimulateResponse {
            seed: request.config.seed,
            withdrawal_start_period: outcome.withdrawal_start_period,
            total_net_withdrawn: outcome.total_net_withdrawn,
            final_balance: outcome.final_balance,
            summary: outcome.summary,
            records: outcome.records,
            paths: Vec::new(),
        });
    }

    let base_seed = request.config.seed.unwrap_or_else(rand::random);
    let mut first = None;
    let mut paths = Vec::with_capacity(request.paths as usize);
    for path in 0..request.paths {
        let seed = derive_seed(base_seed, path);
        let config = Configuration {
            seed: Some(seed),
            ..request.config.clone()
        };
        let outcome = run(&config).map_err(|e| e.to_string())?;
        paths.push(PathSummary {
            path,
            seed,
            summary: outcome.summary,
        });
        if first.is_none() {
            first = Some(outcome);
        }
    }

    let first = first.ok_or_else(|| "no paths were run".to_string())?;
    Ok(SimulateResponse {
        seed: Some(base_seed),
        withdrawal_start_period: first.withdrawal_start_period,
        total_net_withdrawn: first.total_net_withdrawn,
        final_balance: first.final_balance,
        summary: first.summary,
        records: first.records,
        paths,
    })
}

fn derive_seed(base_seed: u64, path: u32) -> u64 {
    splitmix64(base_seed ^ ((path as u64) << 32))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: SimulatePayload) -> Result<ApiRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.initial_balance {
        cli.initial_balance = v;
    }
    if let Some(v) = payload.seed {
        cli.seed = Some(v);
    }
    if let Some(v) = payload.paths {
        cli.paths = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.contribution_multiplier {
        cli.contribution_multiplier = v;
    }
    if let Some(v) = payload.contribution_growth {
        cli.contribution_growth_rate = v;
    }
    if let Some(v) = payload.step_direction {
        cli.step_direction = v.into();
    }
    if let Some(v) = payload.step_interval_years {
        cli.step_interval_years = v;
    }
    if let Some(v) = payload.step_amount {
        cli.step_amount = v;
    }
    if let Some(v) = payload.step_floor {
        cli.step_floor = v;
    }
    if let Some(v) = payload.step_ceiling {
        cli.step_ceiling = Some(v);
    }
    if let Some(v) = payload.contribute_during_withdrawal {
        cli.contribute_during_withdrawal = v;
    }
    if let Some(v) = payload.target_balance {
        cli.target_balance = v;
    }
    if let Some(v) = payload.min_balance {
        cli.min_balance = v;
    }
    if let Some(v) = payload.upper_balance {
        cli.upper_balance = v;
    }
    if let Some(v) = payload.withdrawal_strategy {
        cli.withdrawal_strategy = v.into();
    }
    if let Some(v) = payload.withdrawal_amount {
        cli.withdrawal_amount = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        cli.withdrawal_rate = v;
    }
    if let Some(v) = payload.withdrawal_growth {
        cli.withdrawal_growth_rate = v;
    }
    if let Some(v) = payload.tax_rate {
        cli.tax_rate = v;
    }
    if let Some(v) = payload.management_fee {
        cli.management_fee = v;
    }
    if let Some(v) = payload.return_model {
        cli.return_model = v.into();
    }
    if let Some(v) = payload.mean_return {
        cli.mean_return = v;
    }
    if let Some(v) = payload.return_volatility {
        cli.return_volatility = v;
    }
    if let Some(v) = payload.monthly_return_inputs {
        cli.monthly_return_inputs = v;
    }
    if let Some(v) = payload.loss_ceiling {
        cli.loss_ceiling = Some(v);
    }
    if let Some(v) = payload.historical_returns {
        cli.historical_returns = v;
    }
    if let Some(v) = payload.monthly_returns {
        cli.monthly_returns = v;
    }
    if let Some(v) = payload.granularity {
        cli.granularity = v.into();
    }
    if let Some(v) = payload.withdrawal_timing {
        cli.withdrawal_timing = v.into();
    }
    if let Some(v) = payload.withdrawal_month {
        cli.withdrawal_month = v;
    }
    if let Some(v) = payload.contribution_timing {
        cli.contribution_timing = v.into();
    }
    if let Some(v) = payload.extra_months {
        cli.extra_months = v;
    }

    build_request(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        years: 55,
        initial_balance: 20_000.0,
        seed: None,
        paths: 1,
        monthly_contribution: 200.0,
        contribution_multiplier: 14.0,
        contribution_growth_rate: 0.0,
        step_direction: CliStepDirection::Up,
        step_interval_years: 5,
        step_amount: 100.0,
        step_floor: 0.0,
        step_ceiling: None,
        contribute_during_withdrawal: false,
        target_balance: 400_000.0,
        min_balance: 300_000.0,
        upper_balance: 600_000.0,
        withdrawal_strategy: CliWithdrawalStrategy::FixedNet,
        withdrawal_amount: 20_000.0,
        withdrawal_rate: 4.0,
        withdrawal_growth_rate: 0.0,
        tax_rate: 19.8,
        management_fee: 0.5,
        return_model: CliReturnModel::Stochastic,
        mean_return: 7.0,
        return_volatility: 15.0,
        monthly_return_inputs: false,
        loss_ceiling: None,
        historical_returns: Vec::new(),
        monthly_returns: Vec::new(),
        granularity: CliGranularity::Annual,
        withdrawal_timing: CliWithdrawalTiming::EveryMonth,
        withdrawal_month: 1,
        contribution_timing: CliContributionTiming::ProRata,
        extra_months: vec![6, 12],
    }
}
