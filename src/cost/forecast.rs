use super::calculator::calculate_schedule_cost;
use super::types::{Confidence, CostForecast, CostOptions};
use crate::model::{Employee, Shift};

pub const DEFAULT_FORECAST_PERIOD_DAYS: u32 = 30;

/// Prévision linéaire : moyenne journalière de l'historique × nombre de jours prévus.
///
/// L'étendue de l'historique va de la plus ancienne à la plus récente date
/// (bornes incluses). Moins de deux jours d'historique donne une prévision nulle.
pub fn forecast_costs(
    historical_shifts: &[Shift],
    employees: &[Employee],
    forecast_period_days: u32,
) -> CostForecast {
    let costs = calculate_schedule_cost(historical_shifts, employees, &CostOptions::default());
    let dates = historical_shifts.iter().filter(|s| s.is_work()).map(|s| s.date);
    let span = match (dates.clone().min(), dates.max()) {
        (Some(first), Some(last)) => (last - first).num_days() + 1,
        _ => 0,
    };

    if span <= 1 {
        let message = if span == 0 {
            "no historical shifts to forecast from"
        } else {
            "a single day of history is not enough to forecast"
        };
        return CostForecast {
            forecasted_cost: 0.0,
            daily_average: 0.0,
            confidence: Confidence::Low,
            historical_cost: costs.total_cost,
            historical_days: span,
            forecast_period_days,
            message: Some(message.to_string()),
        };
    }

    let daily_average = costs.total_cost / span as f64;
    let confidence = match span {
        d if d >= 30 => Confidence::High,
        d if d >= 14 => Confidence::Medium,
        _ => Confidence::Low,
    };

    CostForecast {
        forecasted_cost: daily_average * f64::from(forecast_period_days),
        daily_average,
        confidence,
        historical_cost: costs.total_cost,
        historical_days: span,
        forecast_period_days,
        message: None,
    }
}
