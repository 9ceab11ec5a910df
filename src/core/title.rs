use super::scenario::weekly_allowance_cents;
use super::types::{Frequency, OneTimeDirection, ScenarioConfig, ScenarioTitleContext, WeeklyDirection};

pub fn format_cents(cents: i64) -> String {
    let dollars = cents / 100;
    let remainder = cents % 100;
    if remainder == 0 {
        format!("${dollars}")
    } else {
        format!("${dollars}.{remainder:02}")
    }
}

fn bold(cents: i64) -> String {
    format!("**{}**", format_cents(cents))
}

impl ScenarioTitleContext {
    pub fn new(
        allowance_amount_cents: i64,
        allowance_frequency: Option<Frequency>,
        scenario: &ScenarioConfig,
    ) -> Self {
        let weekly_allowance = weekly_allowance_cents(allowance_amount_cents, allowance_frequency);
        Self {
            has_allowance: weekly_allowance.is_some(),
            weekly_allowance_cents: weekly_allowance.unwrap_or(0),
            weekly_amount_cents: scenario.weekly_amount_cents,
            weekly_direction: scenario.weekly_direction,
            one_time_amount_cents: scenario.one_time_amount_cents,
            one_time_direction: scenario.one_time_direction,
        }
    }
}

fn allowance_clause(ctx: &ScenarioTitleContext) -> String {
    let allowance = format_cents(ctx.weekly_allowance_cents);
    let weekly = ctx.weekly_amount_cents;
    if weekly == 0 {
        return format!("save **all** of my {allowance} allowance");
    }
    match ctx.weekly_direction {
        WeeklyDirection::Saving => format!(
            "save **all** of my {allowance} allowance plus an additional {} per week",
            bold(weekly)
        ),
        WeeklyDirection::Spending if weekly > ctx.weekly_allowance_cents => format!(
            "spend my whole {allowance} allowance plus another {} per week",
            bold(weekly - ctx.weekly_allowance_cents)
        ),
        WeeklyDirection::Spending if weekly == ctx.weekly_allowance_cents => {
            format!("save **none** of my {allowance} allowance")
        }
        WeeklyDirection::Spending => format!(
            "save {} per week from my {allowance} allowance",
            bold(ctx.weekly_allowance_cents - weekly)
        ),
    }
}

fn one_time_action(direction: OneTimeDirection, cents: i64) -> String {
    match direction {
        OneTimeDirection::Deposit => format!("deposit {} now", bold(cents)),
        OneTimeDirection::Withdrawal => format!("withdraw {} now", bold(cents)),
    }
}

fn conjunction(direction: OneTimeDirection) -> &'static str {
    match direction {
        OneTimeDirection::Deposit => "and",
        OneTimeDirection::Withdrawal => "but",
    }
}

pub fn generate_scenario_title(ctx: &ScenarioTitleContext) -> String {
    let one_time = (ctx.one_time_amount_cents > 0)
        .then(|| (ctx.one_time_direction, one_time_action(ctx.one_time_direction, ctx.one_time_amount_cents)));

    if ctx.has_allowance {
        let weekly = allowance_clause(ctx);
        return match one_time {
            Some((direction, action)) => {
                format!("If I {weekly}, {} {action}", conjunction(direction))
            }
            None => format!("If I {weekly}"),
        };
    }

    let weekly = ctx.weekly_amount_cents;
    if weekly == 0 {
        return match one_time {
            Some((_, action)) => format!("If I {action}"),
            None => "If I don't do anything".to_string(),
        };
    }

    match (ctx.weekly_direction, one_time) {
        (WeeklyDirection::Spending, Some((OneTimeDirection::Deposit, action))) => {
            format!("If I {action} and spend {} per week", bold(weekly))
        }
        (WeeklyDirection::Spending, Some((OneTimeDirection::Withdrawal, action))) => {
            format!("If I spend {} per week, and {action}", bold(weekly))
        }
        (WeeklyDirection::Spending, None) => format!("If I spend {} per week", bold(weekly)),
        (WeeklyDirection::Saving, Some((direction, action))) => format!(
            "If I save {} per week, {} {action}",
            bold(weekly),
            conjunction(direction)
        ),
        (WeeklyDirection::Saving, None) => format!("If I save {} per week", bold(weekly)),
    }
}
