use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    DEFAULT_HORIZON_MONTHS, Frequency, OneTimeDirection, ProjectionConfig, ProjectionResult,
    ScenarioConfig, ScenarioTitleContext, ShareParams, SharedScenarios, WeeklyDirection,
    build_default_scenarios, calculate_projection_at, deserialize_scenarios,
    generate_scenario_title, map_scenario_config_to_inputs, next_scenario_color, next_scenario_id,
    serialize_scenarios,
};

pub const MAX_HORIZON_MONTHS: u32 = 1_200;
pub const MAX_COMPARE_SCENARIOS: usize = 10;
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;
pub const MAX_INTEREST_RATE_BPS: i64 = 10_000;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum InputError {
    #[error("--{0} must be >= 0")]
    Negative(&'static str),
    #[error("--{0} must be <= {}", MAX_AMOUNT_CENTS)]
    AmountTooLarge(&'static str),
    #[error("--interest-rate-bps must be <= {}", MAX_INTEREST_RATE_BPS)]
    RateTooHigh,
    #[error("--horizon-months must be > 0")]
    ZeroHorizon,
    #[error("--horizon-months must be <= {}", MAX_HORIZON_MONTHS)]
    HorizonTooLong,
    #[error("scenario {index}: {field} must be >= 0")]
    NegativeScenarioAmount { index: usize, field: &'static str },
    #[error("scenario {index}: {field} must be <= {}", MAX_AMOUNT_CENTS)]
    ScenarioAmountTooLarge { index: usize, field: &'static str },
    #[error("at most {} scenarios can be compared", MAX_COMPARE_SCENARIOS)]
    TooManyScenarios,
    #[error("share link could not be decoded")]
    InvalidShareToken,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl From<CliFrequency> for Frequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Weekly => Frequency::Weekly,
            CliFrequency::Biweekly => Frequency::Biweekly,
            CliFrequency::Monthly => Frequency::Monthly,
        }
    }
}

impl From<Frequency> for CliFrequency {
    fn from(value: Frequency) -> Self {
        match value {
            Frequency::Weekly => CliFrequency::Weekly,
            Frequency::Biweekly => CliFrequency::Biweekly,
            Frequency::Monthly => CliFrequency::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliWeeklyDirection {
    Spending,
    Saving,
}

impl From<CliWeeklyDirection> for WeeklyDirection {
    fn from(value: CliWeeklyDirection) -> Self {
        match value {
            CliWeeklyDirection::Spending => WeeklyDirection::Spending,
            CliWeeklyDirection::Saving => WeeklyDirection::Saving,
        }
    }
}

impl From<WeeklyDirection> for CliWeeklyDirection {
    fn from(value: WeeklyDirection) -> Self {
        match value {
            WeeklyDirection::Spending => CliWeeklyDirection::Spending,
            WeeklyDirection::Saving => CliWeeklyDirection::Saving,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliOneTimeDirection {
    Deposit,
    Withdrawal,
}

impl From<CliOneTimeDirection> for OneTimeDirection {
    fn from(value: CliOneTimeDirection) -> Self {
        match value {
            CliOneTimeDirection::Deposit => OneTimeDirection::Deposit,
            CliOneTimeDirection::Withdrawal => OneTimeDirection::Withdrawal,
        }
    }
}

impl From<OneTimeDirection> for CliOneTimeDirection {
    fn from(value: OneTimeDirection) -> Self {
        match value {
            OneTimeDirection::Deposit => CliOneTimeDirection::Deposit,
            OneTimeDirection::Withdrawal => CliOneTimeDirection::Withdrawal,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "whatif",
    about = "What-if projections for a savings account with allowance and interest"
)]
struct Cli {
    #[arg(long, default_value_t = 0, help = "Current account balance in cents")]
    balance_cents: i64,
    #[arg(
        long,
        default_value_t = 0,
        help = "Annual interest rate in basis points, e.g. 500 for 5%"
    )]
    interest_rate_bps: i64,
    #[arg(long, value_enum, help = "Interest compounding frequency; omit when paused")]
    interest_frequency: Option<CliFrequency>,
    #[arg(long, default_value_t = 0, help = "Allowance per period in cents")]
    allowance_cents: i64,
    #[arg(long, value_enum, help = "Allowance frequency; omit when paused")]
    allowance_frequency: Option<CliFrequency>,
    #[arg(long, default_value_t = 0, help = "Weekly scenario amount in cents")]
    weekly_cents: i64,
    #[arg(long, value_enum, default_value_t = CliWeeklyDirection::Spending)]
    weekly_direction: CliWeeklyDirection,
    #[arg(long, default_value_t = 0, help = "One-time scenario amount in cents")]
    one_time_cents: i64,
    #[arg(long, value_enum, default_value_t = CliOneTimeDirection::Deposit)]
    one_time_direction: CliOneTimeDirection,
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS, help = "Projection horizon in months")]
    horizon_months: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AccountState {
    balance_cents: i64,
    interest_rate_bps: i64,
    interest_frequency: Option<Frequency>,
    allowance_cents: i64,
    allowance_frequency: Option<Frequency>,
}

impl AccountState {
    fn projection_config(&self, scenario: &ScenarioConfig, horizon_months: u32) -> ProjectionConfig {
        ProjectionConfig {
            current_balance_cents: self.balance_cents,
            interest_rate_bps: self.interest_rate_bps,
            interest_frequency: self.interest_frequency,
            allowance_amount_cents: self.allowance_cents,
            allowance_frequency: self.allowance_frequency,
            scenario: map_scenario_config_to_inputs(scenario, horizon_months),
        }
    }

    fn title_for(&self, scenario: &ScenarioConfig) -> String {
        let ctx =
            ScenarioTitleContext::new(self.allowance_cents, self.allowance_frequency, scenario);
        generate_scenario_title(&ctx)
    }
}

#[derive(Debug, Clone)]
struct ProjectRequest {
    account: AccountState,
    scenario: ScenarioConfig,
    horizon_months: u32,
}

#[derive(Debug, Clone)]
struct CompareRequest {
    account: AccountState,
    scenarios: Vec<ScenarioConfig>,
    horizon_months: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    balance_cents: Option<i64>,
    interest_rate_bps: Option<i64>,
    interest_frequency: Option<Frequency>,
    allowance_cents: Option<i64>,
    allowance_frequency: Option<Frequency>,
    weekly_cents: Option<i64>,
    weekly_direction: Option<WeeklyDirection>,
    one_time_cents: Option<i64>,
    one_time_direction: Option<OneTimeDirection>,
    horizon_months: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    balance_cents: Option<i64>,
    interest_rate_bps: Option<i64>,
    interest_frequency: Option<Frequency>,
    allowance_cents: Option<i64>,
    allowance_frequency: Option<Frequency>,
    horizon_months: Option<u32>,
    scenarios: Vec<ScenarioConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DefaultsPayload {
    allowance_cents: Option<i64>,
    allowance_frequency: Option<Frequency>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    title: String,
    share: String,
    result: ProjectionResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioProjection {
    id: String,
    color: String,
    title: String,
    result: ProjectionResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    horizon_months: u32,
    share: String,
    scenarios: Vec<ScenarioProjection>,
}

#[derive(Debug, Serialize)]
struct DefaultsResponse {
    scenarios: Vec<ScenarioConfig>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn validate_amount(name: &'static str, value: i64) -> Result<i64, InputError> {
    if value < 0 {
        return Err(InputError::Negative(name));
    }
    if value > MAX_AMOUNT_CENTS {
        return Err(InputError::AmountTooLarge(name));
    }
    Ok(value)
}

fn validate_account(cli: &Cli) -> Result<AccountState, InputError> {
    validate_amount("balance-cents", cli.balance_cents)?;
    validate_amount("allowance-cents", cli.allowance_cents)?;
    if cli.interest_rate_bps < 0 {
        return Err(InputError::Negative("interest-rate-bps"));
    }
    if cli.interest_rate_bps > MAX_INTEREST_RATE_BPS {
        return Err(InputError::RateTooHigh);
    }

    Ok(AccountState {
        balance_cents: cli.balance_cents,
        interest_rate_bps: cli.interest_rate_bps,
        interest_frequency: cli.interest_frequency.map(Into::into),
        allowance_cents: cli.allowance_cents,
        allowance_frequency: cli.allowance_frequency.map(Into::into),
    })
}

fn validate_horizon(horizon_months: u32) -> Result<u32, InputError> {
    if horizon_months == 0 {
        return Err(InputError::ZeroHorizon);
    }
    if horizon_months > MAX_HORIZON_MONTHS {
        return Err(InputError::HorizonTooLong);
    }
    Ok(horizon_months)
}

fn validate_scenario(index: usize, scenario: &ScenarioConfig) -> Result<(), InputError> {
    for (field, value) in [
        ("weeklyAmountCents", scenario.weekly_amount_cents),
        ("oneTimeAmountCents", scenario.one_time_amount_cents),
    ] {
        if value < 0 {
            return Err(InputError::NegativeScenarioAmount { index, field });
        }
        if value > MAX_AMOUNT_CENTS {
            return Err(InputError::ScenarioAmountTooLarge { index, field });
        }
    }
    Ok(())
}

fn build_project_request(cli: Cli) -> Result<ProjectRequest, InputError> {
    let account = validate_account(&cli)?;
    let horizon_months = validate_horizon(cli.horizon_months)?;

    validate_amount("weekly-cents", cli.weekly_cents)?;
    validate_amount("one-time-cents", cli.one_time_cents)?;

    let [first, _] = build_default_scenarios(account.allowance_cents, account.allowance_frequency);
    let scenario = ScenarioConfig {
        weekly_amount_cents: cli.weekly_cents,
        weekly_direction: cli.weekly_direction.into(),
        one_time_amount_cents: cli.one_time_cents,
        one_time_direction: cli.one_time_direction.into(),
        ..first
    };

    Ok(ProjectRequest {
        account,
        scenario,
        horizon_months,
    })
}

// Missing ids and colors are filled in from the palette.
fn build_compare_request(
    cli: Cli,
    scenarios: Vec<ScenarioConfig>,
) -> Result<CompareRequest, InputError> {
    let account = validate_account(&cli)?;
    let horizon_months = validate_horizon(cli.horizon_months)?;

    if scenarios.len() > MAX_COMPARE_SCENARIOS {
        return Err(InputError::TooManyScenarios);
    }

    if scenarios.is_empty() {
        return Ok(CompareRequest {
            account,
            scenarios: build_default_scenarios(account.allowance_cents, account.allowance_frequency)
                .to_vec(),
            horizon_months,
        });
    }

    let mut resolved: Vec<ScenarioConfig> = Vec::with_capacity(scenarios.len());
    for (index, mut scenario) in scenarios.into_iter().enumerate() {
        validate_scenario(index, &scenario)?;
        if scenario.id.is_empty() {
            scenario.id = next_scenario_id(&resolved);
        }
        if scenario.color.is_empty() {
            scenario.color = next_scenario_color(&resolved).to_string();
        }
        resolved.push(scenario);
    }

    Ok(CompareRequest {
        account,
        scenarios: resolved,
        horizon_months,
    })
}

fn overlay_account(
    cli: &mut Cli,
    balance_cents: Option<i64>,
    interest_rate_bps: Option<i64>,
    interest_frequency: Option<Frequency>,
    allowance_cents: Option<i64>,
    allowance_frequency: Option<Frequency>,
) {
    if let Some(v) = balance_cents {
        cli.balance_cents = v;
    }
    if let Some(v) = interest_rate_bps {
        cli.interest_rate_bps = v;
    }
    if let Some(v) = interest_frequency {
        cli.interest_frequency = Some(v.into());
    }
    if let Some(v) = allowance_cents {
        cli.allowance_cents = v;
    }
    if let Some(v) = allowance_frequency {
        cli.allowance_frequency = Some(v.into());
    }
}

fn project_request_from_payload(payload: ProjectPayload) -> Result<ProjectRequest, InputError> {
    let mut cli = default_cli();
    overlay_account(
        &mut cli,
        payload.balance_cents,
        payload.interest_rate_bps,
        payload.interest_frequency,
        payload.allowance_cents,
        payload.allowance_frequency,
    );

    if let Some(v) = payload.weekly_cents {
        cli.weekly_cents = v;
    }
    if let Some(v) = payload.weekly_direction {
        cli.weekly_direction = v.into();
    }
    if let Some(v) = payload.one_time_cents {
        cli.one_time_cents = v;
    }
    if let Some(v) = payload.one_time_direction {
        cli.one_time_direction = v.into();
    }
    if let Some(v) = payload.horizon_months {
        cli.horizon_months = v;
    }

    build_project_request(cli)
}

fn compare_request_from_payload(payload: ComparePayload) -> Result<CompareRequest, InputError> {
    let mut cli = default_cli();
    overlay_account(
        &mut cli,
        payload.balance_cents,
        payload.interest_rate_bps,
        payload.interest_frequency,
        payload.allowance_cents,
        payload.allowance_frequency,
    );
    if let Some(v) = payload.horizon_months {
        cli.horizon_months = v;
    }

    build_compare_request(cli, payload.scenarios)
}

fn default_cli() -> Cli {
    Cli {
        balance_cents: 0,
        interest_rate_bps: 0,
        interest_frequency: None,
        allowance_cents: 0,
        allowance_frequency: None,
        weekly_cents: 0,
        weekly_direction: CliWeeklyDirection::Spending,
        one_time_cents: 0,
        one_time_direction: CliOneTimeDirection::Deposit,
        horizon_months: DEFAULT_HORIZON_MONTHS,
    }
}

fn build_project_response(request: &ProjectRequest, today: DateTime<Utc>) -> ProjectResponse {
    let config = request
        .account
        .projection_config(&request.scenario, request.horizon_months);
    ProjectResponse {
        title: request.account.title_for(&request.scenario),
        share: serialize_scenarios(std::slice::from_ref(&request.scenario), request.horizon_months),
        result: calculate_projection_at(&config, today),
    }
}

fn build_compare_response(request: &CompareRequest, today: DateTime<Utc>) -> CompareResponse {
    let scenarios = request
        .scenarios
        .iter()
        .map(|scenario| {
            let config = request
                .account
                .projection_config(scenario, request.horizon_months);
            ScenarioProjection {
                id: scenario.id.clone(),
                color: scenario.color.clone(),
                title: request.account.title_for(scenario),
                result: calculate_projection_at(&config, today),
            }
        })
        .collect();

    CompareResponse {
        horizon_months: request.horizon_months,
        share: serialize_scenarios(&request.scenarios, request.horizon_months),
        scenarios,
    }
}

fn decode_share(params: &ShareParams) -> Result<SharedScenarios, InputError> {
    deserialize_scenarios(params).ok_or(InputError::InvalidShareToken)
}

pub fn run_projection_cli<I, T>(args: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let request = build_project_request(cli)?;
    let response = build_project_response(&request, Utc::now());
    Ok(serde_json::to_string_pretty(&response)?)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router();

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "what-if projection API listening");

    axum::serve(listener, app).await
}

fn router() -> Router {
    Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/compare", post(compare_handler))
        .route("/api/scenarios/defaults", get(defaults_handler))
        .route("/api/share", get(share_handler))
        .fallback(not_found_handler)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    match project_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_project_response(&request, Utc::now())),
        Err(err) => bad_request(err),
    }
}

async fn compare_handler(Json(payload): Json<ComparePayload>) -> Response {
    match compare_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_compare_response(&request, Utc::now())),
        Err(err) => bad_request(err),
    }
}

async fn defaults_handler(Query(payload): Query<DefaultsPayload>) -> Response {
    let allowance_cents = match validate_amount("allowance-cents", payload.allowance_cents.unwrap_or(0)) {
        Ok(cents) => cents,
        Err(err) => return bad_request(err),
    };
    let scenarios = build_default_scenarios(allowance_cents, payload.allowance_frequency).to_vec();
    json_response(StatusCode::OK, DefaultsResponse { scenarios })
}

async fn share_handler(Query(params): Query<ShareParams>) -> Response {
    match decode_share(&params) {
        Ok(shared) => json_response(StatusCode::OK, shared),
        Err(err) => bad_request(err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn bad_request(err: InputError) -> Response {
    warn!(%err, "rejected request");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
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
mod tests {
    use super::*;
    use crate::core::SCENARIO_COLORS;
    use chrono::TimeZone;

    fn today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn project_request_from_json(json: &str) -> Result<ProjectRequest, String> {
        let payload = serde_json::from_str::<ProjectPayload>(json)
            .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
        project_request_from_payload(payload).map_err(|e| e.to_string())
    }

    fn compare_request_from_json(json: &str) -> Result<CompareRequest, String> {
        let payload = serde_json::from_str::<ComparePayload>(json)
            .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
        compare_request_from_payload(payload).map_err(|e| e.to_string())
    }

    #[test]
    fn project_request_parses_web_keys() {
        let json = r#"{
          "balanceCents": 10000,
          "interestRateBps": 250,
          "interestFrequency": "monthly",
          "allowanceCents": 1000,
          "allowanceFrequency": "weekly",
          "weeklyCents": 400,
          "weeklyDirection": "saving",
          "oneTimeCents": 2500,
          "oneTimeDirection": "withdrawal",
          "horizonMonths": 24
        }"#;
        let request = project_request_from_json(json).expect("json should parse");

        assert_eq!(request.account.balance_cents, 10_000);
        assert_eq!(request.account.interest_rate_bps, 250);
        assert_eq!(request.account.interest_frequency, Some(Frequency::Monthly));
        assert_eq!(request.account.allowance_frequency, Some(Frequency::Weekly));
        assert_eq!(request.scenario.weekly_amount_cents, 400);
        assert_eq!(request.scenario.weekly_direction, WeeklyDirection::Saving);
        assert_eq!(request.scenario.one_time_amount_cents, 2_500);
        assert_eq!(
            request.scenario.one_time_direction,
            OneTimeDirection::Withdrawal
        );
        assert_eq!(request.horizon_months, 24);
    }

    #[test]
    fn project_request_defaults_leave_schedules_paused() {
        let request = project_request_from_json("{}").expect("empty payload is valid");
        assert_eq!(request.account.interest_frequency, None);
        assert_eq!(request.account.allowance_frequency, None);
        assert_eq!(request.horizon_months, DEFAULT_HORIZON_MONTHS);
        assert_eq!(request.scenario.id, "s0");
    }

    #[test]
    fn project_request_rejects_unknown_frequency() {
        let err = project_request_from_json(r#"{"allowanceFrequency": "daily"}"#)
            .expect_err("must reject out-of-enum frequency");
        assert!(err.contains("Invalid API JSON payload"));
    }

    #[test]
    fn build_project_request_rejects_negative_amounts() {
        let mut cli = default_cli();
        cli.balance_cents = -1;
        let err = build_project_request(cli).expect_err("must reject negative balance");
        assert_eq!(err, InputError::Negative("balance-cents"));
        assert!(err.to_string().contains("--balance-cents"));

        let mut cli = default_cli();
        cli.weekly_cents = -5;
        let err = build_project_request(cli).expect_err("must reject negative weekly amount");
        assert!(err.to_string().contains("--weekly-cents"));
    }

    #[test]
    fn build_project_request_rejects_bad_horizons() {
        let mut cli = default_cli();
        cli.horizon_months = 0;
        assert_eq!(
            build_project_request(cli).expect_err("zero horizon"),
            InputError::ZeroHorizon
        );

        let mut cli = default_cli();
        cli.horizon_months = MAX_HORIZON_MONTHS + 1;
        assert_eq!(
            build_project_request(cli).expect_err("horizon too long"),
            InputError::HorizonTooLong
        );
    }

    #[test]
    fn project_request_rejects_amounts_that_could_overflow() {
        let err = project_request_from_json(
            r#"{"balanceCents": 9223372036854775807, "oneTimeCents": 1}"#,
        )
        .expect_err("must reject near-overflow balance");
        assert!(err.contains("--balance-cents must be <="));

        let err = project_request_from_json(
            r#"{"weeklyCents": 100000000000000000, "weeklyDirection": "saving", "horizonMonths": 60}"#,
        )
        .expect_err("must reject oversized weekly amount");
        assert!(err.contains("--weekly-cents must be <="));

        let mut cli = default_cli();
        cli.interest_rate_bps = MAX_INTEREST_RATE_BPS + 1;
        assert_eq!(
            build_project_request(cli).expect_err("rate too high"),
            InputError::RateTooHigh
        );

        let mut cli = default_cli();
        cli.balance_cents = MAX_AMOUNT_CENTS;
        cli.weekly_cents = MAX_AMOUNT_CENTS;
        cli.weekly_direction = CliWeeklyDirection::Saving;
        cli.interest_rate_bps = MAX_INTEREST_RATE_BPS;
        cli.interest_frequency = Some(CliFrequency::Weekly);
        cli.horizon_months = MAX_HORIZON_MONTHS;
        let request = build_project_request(cli).expect("largest accepted inputs");
        let response = build_project_response(&request, today());
        assert!(response.result.final_balance_cents > MAX_AMOUNT_CENTS);
    }

    #[test]
    fn project_response_carries_title_share_and_result() {
        let request = project_request_from_json(
            r#"{"balanceCents": 5000, "weeklyCents": 1000, "horizonMonths": 3}"#,
        )
        .expect("valid request");
        let response = build_project_response(&request, today());

        assert_eq!(response.title, "If I spend **$10** per week");
        assert_eq!(response.result.depletion_week, Some(5));
        assert_eq!(response.result.data_points.len(), 14);
        assert!(response.share.starts_with("scenarios="));
        assert!(response.share.ends_with("&h=3"));

        let json = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(json["result"]["depletionWeek"], 5);
        assert_eq!(json["result"]["dataPoints"][0]["weekIndex"], 0);
        assert_eq!(json["result"]["startingBalanceCents"], 5000);
    }

    #[test]
    fn compare_without_scenarios_uses_allowance_defaults() {
        let request = compare_request_from_json(
            r#"{"balanceCents": 10000, "allowanceCents": 2000, "allowanceFrequency": "weekly"}"#,
        )
        .expect("valid request");
        assert_eq!(request.scenarios.len(), 2);
        assert_eq!(request.scenarios[1].weekly_amount_cents, 2_000);

        let response = build_compare_response(&request, today());
        assert_eq!(
            response.scenarios[0].title,
            "If I save **all** of my $20 allowance"
        );
        assert_eq!(
            response.scenarios[1].title,
            "If I save **none** of my $20 allowance"
        );
        assert_eq!(response.scenarios[1].result.final_balance_cents, 10_000);
        assert_eq!(response.scenarios[0].result.final_balance_cents, 114_000);
    }

    #[test]
    fn compare_fills_missing_ids_and_colors() {
        let request = compare_request_from_json(
            r##"{
              "scenarios": [
                {"id": "s4", "weeklyAmountCents": 100, "weeklyDirection": "saving",
                 "oneTimeAmountCents": 0, "oneTimeDirection": "deposit", "color": "#3b82f6"},
                {"weeklyAmountCents": 200, "weeklyDirection": "spending",
                 "oneTimeAmountCents": 500, "oneTimeDirection": "withdrawal"}
              ]
            }"##,
        )
        .expect("valid request");

        assert_eq!(request.scenarios[1].id, "s5");
        assert_eq!(request.scenarios[1].color, SCENARIO_COLORS[1]);
    }

    #[test]
    fn compare_rejects_too_many_and_negative_scenarios() {
        let scenario = r#"{"weeklyAmountCents": 100, "weeklyDirection": "saving",
            "oneTimeAmountCents": 0, "oneTimeDirection": "deposit"}"#;
        let many = vec![scenario; MAX_COMPARE_SCENARIOS + 1].join(",");
        let err = compare_request_from_json(&format!(r#"{{"scenarios": [{many}]}}"#))
            .expect_err("must reject oversized comparison");
        assert!(err.contains("at most"));

        let err = compare_request_from_json(
            r#"{"scenarios": [{"weeklyAmountCents": -1, "weeklyDirection": "saving",
                "oneTimeAmountCents": 0, "oneTimeDirection": "deposit"}]}"#,
        )
        .expect_err("must reject negative scenario amount");
        assert!(err.contains("scenario 0: weeklyAmountCents"));
    }

    #[test]
    fn compare_request_rejects_oversized_scenario_amount() {
        let err = compare_request_from_json(
            r#"{"scenarios": [{"weeklyAmountCents": 0, "weeklyDirection": "saving",
                "oneTimeAmountCents": 9223372036854775807, "oneTimeDirection": "deposit"}]}"#,
        )
        .expect_err("must reject oversized scenario amount");
        assert!(err.contains("scenario 0: oneTimeAmountCents must be <="));
    }

    #[test]
    fn compare_share_decodes_back_to_same_amounts() {
        let request = compare_request_from_json(r#"{"horizonMonths": 6}"#).expect("valid request");
        let response = build_compare_response(&request, today());

        let shared = decode_share(&ShareParams::from_query(&response.share)).expect("decodes");
        assert_eq!(shared.horizon_months, 6);
        assert_eq!(shared.scenarios.len(), request.scenarios.len());
        for (original, decoded) in request.scenarios.iter().zip(&shared.scenarios) {
            assert_eq!(original.weekly_amount_cents, decoded.weekly_amount_cents);
            assert_eq!(original.weekly_direction, decoded.weekly_direction);
        }
    }

    #[test]
    fn decode_share_reports_bad_tokens() {
        let err = decode_share(&ShareParams::from_query("scenarios=%%%&h=3"))
            .expect_err("must reject garbage");
        assert_eq!(err, InputError::InvalidShareToken);
    }

    #[test]
    fn cli_flags_produce_projection_json() {
        let output = run_projection_cli([
            "whatif",
            "--balance-cents",
            "10000",
            "--allowance-cents",
            "1000",
            "--allowance-frequency",
            "weekly",
            "--horizon-months",
            "12",
        ])
        .expect("cli should run");
        let json: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(json["title"], "If I save **all** of my $10 allowance");
        assert_eq!(json["result"]["finalBalanceCents"], 62_000);
        assert_eq!(json["result"]["totalAllowanceCents"], 52_000);
    }

    #[test]
    fn cli_rejects_negative_balance() {
        let err = run_projection_cli(["whatif", "--balance-cents=-5"])
            .expect_err("must reject negative balance");
        assert!(err.to_string().contains("--balance-cents"));
    }
}
