use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use super::period::{horizon_to_weeks, periods_per_year, weeks_per_period};
use super::types::{Frequency, ProjectionConfig, ProjectionDataPoint, ProjectionResult};

const BPS_PER_UNIT: f64 = 10_000.0;

// The due week accumulates as a fraction and is rounded only when compared,
// so monthly schedules land on a 4/4/5-week cadence.
#[derive(Debug, Clone, Copy)]
struct Schedule {
    interval: f64,
    next_due: f64,
}

impl Schedule {
    fn starting_after_today(frequency: Frequency) -> Self {
        let interval = weeks_per_period(frequency);
        Self {
            interval,
            next_due: interval,
        }
    }

    fn is_due(&self, week: u32) -> bool {
        week as f64 >= self.next_due.round()
    }

    fn advance(&mut self) {
        self.next_due += self.interval;
    }
}

#[derive(Debug, Clone, Copy)]
struct InterestSchedule {
    rate_per_period: f64,
    schedule: Schedule,
}

#[derive(Debug, Clone, Copy)]
struct AllowanceSchedule {
    amount_cents: i64,
    schedule: Schedule,
}

#[derive(Debug, Default)]
struct Totals {
    interest: i64,
    allowance: i64,
    spending: i64,
    savings: i64,
}

fn interest_schedule(config: &ProjectionConfig) -> Option<InterestSchedule> {
    let frequency = config.interest_frequency?;
    if config.interest_rate_bps <= 0 {
        return None;
    }
    Some(InterestSchedule {
        rate_per_period: config.interest_rate_bps as f64
            / BPS_PER_UNIT
            / periods_per_year(frequency) as f64,
        schedule: Schedule::starting_after_today(frequency),
    })
}

fn allowance_schedule(config: &ProjectionConfig) -> Option<AllowanceSchedule> {
    let frequency = config.allowance_frequency?;
    if config.allowance_amount_cents <= 0 {
        return None;
    }
    Some(AllowanceSchedule {
        amount_cents: config.allowance_amount_cents,
        schedule: Schedule::starting_after_today(frequency),
    })
}

// Withdrawal headroom is the balance before the deposit lands.
pub fn effective_starting_balance(config: &ProjectionConfig) -> i64 {
    let scenario = &config.scenario;
    let withdrawal = scenario
        .one_time_withdrawal_cents
        .min(config.current_balance_cents);
    (config.current_balance_cents - withdrawal).saturating_add(scenario.one_time_deposit_cents)
}

pub fn calculate_projection(config: &ProjectionConfig) -> ProjectionResult {
    calculate_projection_at(config, Utc::now())
}

pub fn calculate_projection_at(config: &ProjectionConfig, today: DateTime<Utc>) -> ProjectionResult {
    let scenario = &config.scenario;
    let total_weeks = horizon_to_weeks(scenario.horizon_months);
    let starting_balance_cents = effective_starting_balance(config);

    let mut interest = interest_schedule(config);
    let mut allowance = allowance_schedule(config);
    let mut totals = Totals::default();
    let mut depletion_week = None;

    let mut balance = starting_balance_cents.max(0);
    let mut data_points = Vec::with_capacity(total_weeks as usize + 1);
    data_points.push(ProjectionDataPoint {
        week_index: 0,
        date: today,
        balance_cents: balance,
    });

    for week in 1..=total_weeks {
        if let Some(allowance) = allowance.as_mut()
            && allowance.schedule.is_due(week)
        {
            balance = balance.saturating_add(allowance.amount_cents);
            totals.allowance = totals.allowance.saturating_add(allowance.amount_cents);
            allowance.schedule.advance();
        }

        if let Some(interest) = interest.as_mut()
            && interest.schedule.is_due(week)
        {
            let earned = (balance as f64 * interest.rate_per_period).round() as i64;
            if earned > 0 {
                balance = balance.saturating_add(earned);
                totals.interest = totals.interest.saturating_add(earned);
            }
            interest.schedule.advance();
        }

        if scenario.weekly_savings_cents > 0 {
            balance = balance.saturating_add(scenario.weekly_savings_cents);
            totals.savings = totals.savings.saturating_add(scenario.weekly_savings_cents);
        }

        if scenario.weekly_spending_cents > 0 {
            balance = balance.saturating_sub(scenario.weekly_spending_cents);
            totals.spending = totals.spending.saturating_add(scenario.weekly_spending_cents);
        }

        if balance < 0 {
            // Only record the spending the balance could actually cover.
            totals.spending += balance;
            balance = 0;
        }

        if balance == 0 && depletion_week.is_none() && scenario.weekly_spending_cents > 0 {
            trace!(week, "balance depleted");
            depletion_week = Some(week);
        }

        data_points.push(ProjectionDataPoint {
            week_index: week,
            date: today + Duration::weeks(week as i64),
            balance_cents: balance,
        });
    }

    ProjectionResult {
        data_points,
        final_balance_cents: balance,
        total_interest_cents: totals.interest,
        total_allowance_cents: totals.allowance,
        total_spending_cents: totals.spending,
        total_savings_cents: totals.savings,
        starting_balance_cents,
        depletion_week,
    }
}
