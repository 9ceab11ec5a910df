use super::period::weeks_per_period;
use super::types::{Frequency, OneTimeDirection, ScenarioConfig, ScenarioInputs, WeeklyDirection};

pub const SCENARIO_COLORS: [&str; 6] = [
    "#3b82f6", "#f97316", "#10b981", "#a855f7", "#ef4444", "#eab308",
];

pub const DEFAULT_HORIZON_MONTHS: u32 = 12;
pub const DEFAULT_WEEKLY_SPENDING_CENTS: i64 = 500;

const SCENARIO_ID_PREFIX: &str = "s";

pub fn scenario_id(index: usize) -> String {
    format!("{SCENARIO_ID_PREFIX}{index}")
}

pub fn palette_color(index: usize) -> &'static str {
    SCENARIO_COLORS[index % SCENARIO_COLORS.len()]
}

pub fn map_scenario_config_to_inputs(config: &ScenarioConfig, horizon_months: u32) -> ScenarioInputs {
    let (weekly_spending_cents, weekly_savings_cents) = match config.weekly_direction {
        WeeklyDirection::Spending => (config.weekly_amount_cents, 0),
        WeeklyDirection::Saving => (0, config.weekly_amount_cents),
    };
    let (one_time_deposit_cents, one_time_withdrawal_cents) = match config.one_time_direction {
        OneTimeDirection::Deposit => (config.one_time_amount_cents, 0),
        OneTimeDirection::Withdrawal => (0, config.one_time_amount_cents),
    };

    ScenarioInputs {
        weekly_spending_cents,
        weekly_savings_cents,
        one_time_deposit_cents,
        one_time_withdrawal_cents,
        horizon_months,
    }
}

pub fn weekly_allowance_cents(amount_cents: i64, frequency: Option<Frequency>) -> Option<i64> {
    let frequency = frequency?;
    if amount_cents <= 0 {
        return None;
    }
    Some((amount_cents as f64 / weeks_per_period(frequency)).round() as i64)
}

fn spending_scenario(index: usize, weekly_amount_cents: i64) -> ScenarioConfig {
    ScenarioConfig {
        id: scenario_id(index),
        weekly_amount_cents,
        weekly_direction: WeeklyDirection::Spending,
        one_time_amount_cents: 0,
        one_time_direction: OneTimeDirection::Deposit,
        color: palette_color(index).to_string(),
    }
}

// Without an allowance the second scenario spends a small fixed amount.
pub fn build_default_scenarios(
    allowance_amount_cents: i64,
    allowance_frequency: Option<Frequency>,
) -> [ScenarioConfig; 2] {
    let second_spend = weekly_allowance_cents(allowance_amount_cents, allowance_frequency)
        .unwrap_or(DEFAULT_WEEKLY_SPENDING_CENTS);
    [spending_scenario(0, 0), spending_scenario(1, second_spend)]
}

pub fn next_scenario_color(existing: &[ScenarioConfig]) -> &'static str {
    SCENARIO_COLORS
        .iter()
        .copied()
        .find(|color| !existing.iter().any(|scenario| scenario.color == *color))
        .unwrap_or(SCENARIO_COLORS[0])
}

pub fn next_scenario_id(existing: &[ScenarioConfig]) -> String {
    let next = existing
        .iter()
        .filter_map(|scenario| scenario.id.strip_prefix(SCENARIO_ID_PREFIX))
        .filter_map(|suffix| suffix.parse::<usize>().ok())
        .max()
        .map_or(0, |max| max + 1);
    scenario_id(next)
}
