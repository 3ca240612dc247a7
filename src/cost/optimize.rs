use super::calculator::calculate_schedule_cost;
use super::types::{CostOptimization, CostOptions, Priority, Suggestion, SuggestionKind};
use crate::model::{Employee, Shift};

/// Écart de taux horaire au-delà duquel on suggère de rééquilibrer les effectifs.
pub const RATE_SPREAD_THRESHOLD: f64 = 5.0;

/// Part des majorations de nuit jugée récupérable en déplaçant des créneaux de jour.
const NIGHT_REORGANIZATION_SHARE: f64 = 0.3;
/// Part des heures jugée transférable vers le taux le plus bas.
const RATE_BALANCING_SHARE: f64 = 0.2;

/// Compare le coût d'un planning à un budget et propose des pistes d'économies.
pub fn optimize_costs(
    shifts: &[Shift],
    employees: &[Employee],
    budget: f64,
    options: &CostOptions,
) -> CostOptimization {
    let costs = calculate_schedule_cost(shifts, employees, options);
    let current_cost = costs.total_cost;

    if current_cost <= budget {
        return CostOptimization {
            needs_optimization: false,
            current_cost,
            budget,
            overage: 0.0,
            savings: Some(budget - current_cost),
            suggestions: Vec::new(),
        };
    }

    let mut suggestions = Vec::new();

    if costs.total_overtime_hours > 0.0 {
        let premium: f64 = costs.shift_costs.iter().map(|c| c.breakdown.overtime_cost).sum();
        suggestions.push(Suggestion {
            kind: SuggestionKind::ReduceOvertime,
            priority: Priority::High,
            message: format!(
                "Reduce overtime: {:.1}h scheduled beyond the daily baseline",
                costs.total_overtime_hours
            ),
            potential_savings: Some(premium),
        });
    }

    let night_shifts = shifts.iter().filter(|s| s.is_work() && s.is_night()).count();
    if night_shifts > 0 {
        let night_bonus: f64 = costs.shift_costs.iter().map(|c| c.breakdown.night_shift_bonus).sum();
        suggestions.push(Suggestion {
            kind: SuggestionKind::ReorganizeNightShifts,
            priority: Priority::Medium,
            message: format!("Reorganize night work: {night_shifts} night shift(s) carry a premium"),
            potential_savings: Some(night_bonus * NIGHT_REORGANIZATION_SHARE),
        });
    }

    let rates = employees.iter().map(|e| e.hourly_rate);
    let min_rate = rates.clone().fold(f64::INFINITY, f64::min);
    let max_rate = rates.fold(f64::NEG_INFINITY, f64::max);
    let spread = max_rate - min_rate;
    if spread.is_finite() && spread > RATE_SPREAD_THRESHOLD {
        suggestions.push(Suggestion {
            kind: SuggestionKind::BalanceStaffRates,
            priority: Priority::Low,
            message: format!(
                "Balance staffing toward lower hourly rates ({min_rate:.2} to {max_rate:.2} per hour)"
            ),
            potential_savings: Some(costs.total_hours * spread * RATE_BALANCING_SHARE),
        });
    }

    suggestions.sort_by_key(|s| s.priority);

    tracing::info!(
        current_cost,
        budget,
        suggestions = suggestions.len(),
        "schedule exceeds budget"
    );

    CostOptimization {
        needs_optimization: true,
        current_cost,
        budget,
        overage: current_cost - budget,
        savings: None,
        suggestions,
    }
}
