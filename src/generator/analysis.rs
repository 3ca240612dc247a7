use super::types::{AnalysisConstraints, ScheduleAnalysis};
use crate::compliance::{validate_schedule, Severity};
use crate::cost::{calculate_schedule_cost, Priority, Suggestion, SuggestionKind};
use crate::model::{Employee, EmployeeId, Shift};
use std::collections::BTreeMap;

/// Au-delà de ce coefficient de variation, la charge est jugée déséquilibrée.
pub const WORKLOAD_IMBALANCE_THRESHOLD: f64 = 0.3;

/// Analyse un planning déjà persisté : conformité, coût, équilibre de charge.
pub fn optimize_existing_schedule(
    schedule: &[Shift],
    employees: &[Employee],
    constraints: &AnalysisConstraints,
) -> ScheduleAnalysis {
    let validation = validate_schedule(schedule, &constraints.validation);
    let costs = calculate_schedule_cost(schedule, employees, &constraints.cost);
    let mut suggestions: Vec<Suggestion> = validation
        .violations
        .iter()
        .map(|v| Suggestion {
            kind: SuggestionKind::FixCompliance,
            priority: Priority::High,
            message: format!("{} (art. {})", v.message, v.article),
            potential_savings: None,
        })
        .collect();

    if let Some(budget) = constraints.budget {
        if costs.total_cost > budget {
            let overage = costs.total_cost - budget;
            suggestions.push(Suggestion {
                kind: SuggestionKind::ReduceCost,
                priority: Priority::High,
                message: format!(
                    "Schedule costs {:.2}, exceeding the {budget:.2} budget by {overage:.2}",
                    costs.total_cost
                ),
                potential_savings: Some(overage),
            });
        }
    }

    let variance = workload_variation(schedule);
    if variance > WORKLOAD_IMBALANCE_THRESHOLD {
        suggestions.push(Suggestion {
            kind: SuggestionKind::BalanceWorkload,
            priority: Priority::Medium,
            message: format!(
                "Hours are unevenly spread across employees (coefficient of variation {variance:.2})"
            ),
            potential_savings: None,
        });
    }

    suggestions.sort_by_key(|s| s.priority);

    let errors = validation
        .violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .count() as f64;
    let warnings = validation.violations.len() as f64 - errors;
    let score = (100.0 - 15.0 * errors - 5.0 * warnings - 20.0 * variance).clamp(0.0, 100.0);

    ScheduleAnalysis {
        validation,
        costs,
        suggestions,
        workload_variance: variance,
        optimization_score: score,
    }
}

/// Coefficient de variation (écart-type / moyenne) des heures par salarié planifié.
fn workload_variation(schedule: &[Shift]) -> f64 {
    let mut hours: BTreeMap<&EmployeeId, f64> = BTreeMap::new();
    for shift in schedule.iter().filter(|s| s.is_work()) {
        *hours.entry(&shift.employee_id).or_default() += shift.duration_hours();
    }
    if hours.is_empty() {
        return 0.0;
    }
    let n = hours.len() as f64;
    let mean = hours.values().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = hours.values().map(|h| (h - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}
