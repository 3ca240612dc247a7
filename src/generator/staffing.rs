use super::types::{ForecastData, ScheduleConstraints};
use crate::time;
use chrono::NaiveDate;

/// Besoin d'effectif du jour : prévision datée, sinon par jour de semaine,
/// sinon `preferred_staff_per_shift`.
pub fn staffing_need(
    date: NaiveDate,
    forecast: Option<&ForecastData>,
    constraints: &ScheduleConstraints,
) -> u32 {
    forecast
        .and_then(|f| {
            f.daily
                .get(&date)
                .or_else(|| f.by_day_of_week.get(&time::day_of_week(date)))
        })
        .map(|s| s.required_staff)
        .unwrap_or(constraints.preferred_staff_per_shift)
}
