mod engine;
mod period;
mod scenario;
mod share;
mod title;
mod types;

pub use engine::{calculate_projection, calculate_projection_at, effective_starting_balance};
pub use period::{horizon_to_weeks, periods_per_year, weeks_per_period};
pub use scenario::{
    DEFAULT_HORIZON_MONTHS, DEFAULT_WEEKLY_SPENDING_CENTS, SCENARIO_COLORS,
    build_default_scenarios, map_scenario_config_to_inputs, next_scenario_color, next_scenario_id,
    weekly_allowance_cents,
};
pub use share::{
    HORIZON_KEY, SCENARIOS_KEY, ShareParams, SharedScenarios, deserialize_scenarios, encode_token,
    serialize_scenarios,
};
pub use title::{format_cents, generate_scenario_title};
pub use types::{
    Frequency, OneTimeDirection, ProjectionConfig, ProjectionDataPoint, ProjectionResult,
    ScenarioConfig, ScenarioInputs, ScenarioTitleContext, WeeklyDirection,
};
