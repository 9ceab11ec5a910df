use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyDirection {
    #[default]
    Spending,
    Saving,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneTimeDirection {
    #[default]
    Deposit,
    Withdrawal,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInputs {
    pub weekly_spending_cents: i64,
    pub weekly_savings_cents: i64,
    pub one_time_deposit_cents: i64,
    pub one_time_withdrawal_cents: i64,
    pub horizon_months: u32,
}

// A `None` frequency pauses the schedule regardless of amount or rate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ProjectionConfig {
    pub current_balance_cents: i64,
    pub interest_rate_bps: i64,
    pub interest_frequency: Option<Frequency>,
    pub allowance_amount_cents: i64,
    pub allowance_frequency: Option<Frequency>,
    pub scenario: ScenarioInputs,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionDataPoint {
    pub week_index: u32,
    pub date: DateTime<Utc>,
    pub balance_cents: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub data_points: Vec<ProjectionDataPoint>,
    pub final_balance_cents: i64,
    pub total_interest_cents: i64,
    pub total_allowance_cents: i64,
    pub total_spending_cents: i64,
    pub total_savings_cents: i64,
    pub starting_balance_cents: i64,
    pub depletion_week: Option<u32>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    #[serde(default)]
    pub id: String,
    pub weekly_amount_cents: i64,
    pub weekly_direction: WeeklyDirection,
    pub one_time_amount_cents: i64,
    pub one_time_direction: OneTimeDirection,
    #[serde(default)]
    pub color: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScenarioTitleContext {
    pub has_allowance: bool,
    pub weekly_allowance_cents: i64,
    pub weekly_amount_cents: i64,
    pub weekly_direction: WeeklyDirection,
    pub one_time_amount_cents: i64,
    pub one_time_direction: OneTimeDirection,
}
