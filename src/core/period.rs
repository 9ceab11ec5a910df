use super::types::Frequency;

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

pub fn periods_per_year(frequency: Frequency) -> u32 {
    match frequency {
        Frequency::Weekly => 52,
        Frequency::Biweekly => 26,
        Frequency::Monthly => 12,
    }
}

pub fn weeks_per_period(frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Weekly => 1.0,
        Frequency::Biweekly => 2.0,
        Frequency::Monthly => WEEKS_PER_YEAR / MONTHS_PER_YEAR,
    }
}

pub fn horizon_to_weeks(months: u32) -> u32 {
    (months as f64 * WEEKS_PER_YEAR / MONTHS_PER_YEAR).round() as u32
}
