use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scenario::{DEFAULT_HORIZON_MONTHS, palette_color, scenario_id};
use super::types::{OneTimeDirection, ScenarioConfig, WeeklyDirection};

pub const SCENARIOS_KEY: &str = "scenarios";
pub const HORIZON_KEY: &str = "h";

// Tokens decode with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
enum CompactWeekly {
    #[serde(rename = "s")]
    Spending,
    #[serde(rename = "v")]
    Saving,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
enum CompactOneTime {
    #[serde(rename = "d")]
    Deposit,
    #[serde(rename = "w")]
    Withdrawal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CompactScenario {
    #[serde(rename = "w")]
    weekly_amount_cents: i64,
    #[serde(rename = "wd")]
    weekly_direction: CompactWeekly,
    #[serde(rename = "o")]
    one_time_amount_cents: i64,
    #[serde(rename = "od")]
    one_time_direction: CompactOneTime,
}

impl From<&ScenarioConfig> for CompactScenario {
    fn from(value: &ScenarioConfig) -> Self {
        Self {
            weekly_amount_cents: value.weekly_amount_cents,
            weekly_direction: match value.weekly_direction {
                WeeklyDirection::Spending => CompactWeekly::Spending,
                WeeklyDirection::Saving => CompactWeekly::Saving,
            },
            one_time_amount_cents: value.one_time_amount_cents,
            one_time_direction: match value.one_time_direction {
                OneTimeDirection::Deposit => CompactOneTime::Deposit,
                OneTimeDirection::Withdrawal => CompactOneTime::Withdrawal,
            },
        }
    }
}

impl CompactScenario {
    fn expand(self, index: usize) -> ScenarioConfig {
        ScenarioConfig {
            id: scenario_id(index),
            weekly_amount_cents: self.weekly_amount_cents,
            weekly_direction: match self.weekly_direction {
                CompactWeekly::Spending => WeeklyDirection::Spending,
                CompactWeekly::Saving => WeeklyDirection::Saving,
            },
            one_time_amount_cents: self.one_time_amount_cents,
            one_time_direction: match self.one_time_direction {
                CompactOneTime::Deposit => OneTimeDirection::Deposit,
                CompactOneTime::Withdrawal => OneTimeDirection::Withdrawal,
            },
            color: palette_color(index).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
pub struct ShareParams {
    pub scenarios: Option<String>,
    pub h: Option<String>,
}

impl ShareParams {
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        serde_urlencoded::from_str(query).unwrap_or_else(|err| {
            debug!(%err, "share query is not url-encoded");
            Self::default()
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedScenarios {
    pub scenarios: Vec<ScenarioConfig>,
    pub horizon_months: u32,
}

pub fn encode_token(scenarios: &[ScenarioConfig]) -> String {
    let compact: Vec<CompactScenario> = scenarios.iter().map(CompactScenario::from).collect();
    let json = serde_json::to_vec(&compact).expect("compact scenarios serialize");
    URL_SAFE_NO_PAD.encode(json)
}

pub fn serialize_scenarios(scenarios: &[ScenarioConfig], horizon_months: u32) -> String {
    format!(
        "{SCENARIOS_KEY}={}&{HORIZON_KEY}={horizon_months}",
        encode_token(scenarios)
    )
}

fn decode_token(token: &str) -> Option<Vec<ScenarioConfig>> {
    let bytes = URL_SAFE_LENIENT
        .decode(token)
        .map_err(|err| debug!(%err, "share token is not url-safe base64"))
        .ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|err| debug!(%err, "share token is not json"))
        .ok()?;
    if !value.is_array() {
        debug!("share token is not a json array");
        return None;
    }
    let compact: Vec<CompactScenario> = serde_json::from_value(value)
        .map_err(|err| debug!(%err, "share token has malformed scenarios"))
        .ok()?;
    if compact
        .iter()
        .any(|scenario| scenario.weekly_amount_cents < 0 || scenario.one_time_amount_cents < 0)
    {
        debug!("share token has negative amounts");
        return None;
    }
    Some(
        compact
            .into_iter()
            .enumerate()
            .map(|(index, scenario)| scenario.expand(index))
            .collect(),
    )
}

fn parse_horizon(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|months| *months > 0)
        .unwrap_or(DEFAULT_HORIZON_MONTHS)
}

// Ids and colors are reassigned by position.
pub fn deserialize_scenarios(params: &ShareParams) -> Option<SharedScenarios> {
    let token = params.scenarios.as_deref()?;
    let scenarios = decode_token(token)?;
    Some(SharedScenarios {
        scenarios,
        horizon_months: parse_horizon(params.h.as_deref()),
    })
}
