use super::types::{Ineligibility, ScheduleConstraints};
use super::workload::WorkloadTracker;
use crate::model::{Availability, AvailabilityKind, Employee, Leave, ShiftTemplate};
use crate::time;
use chrono::NaiveDate;

const PRIORITY_WEIGHT: f64 = 10.0;
const BELOW_AVERAGE_BONUS: f64 = 20.0;
const PREFERRED_AVAILABILITY_BONUS: f64 = 30.0;
const AVAILABLE_BONUS: f64 = 15.0;
const COST_ADVANTAGE_WEIGHT: f64 = 25.0;
const PREFERRED_SHIFT_BONUS: f64 = 10.0;
const FATIGUE_PENALTY: f64 = 30.0;
const FATIGUE_THRESHOLD_DAYS: u32 = 5;

/// Contexte d'un jour de génération.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DayContext<'a> {
    pub date: NaiveDate,
    pub weekend: bool,
    pub availabilities: &'a [Availability],
    pub leaves: &'a [Leave],
}

impl<'a> DayContext<'a> {
    pub(crate) fn new(date: NaiveDate, availabilities: &'a [Availability], leaves: &'a [Leave]) -> Self {
        Self {
            date,
            weekend: time::is_weekend(date),
            availabilities,
            leaves,
        }
    }

    fn on_leave(&self, employee: &Employee) -> bool {
        self.leaves.iter().any(|l| l.blocks(&employee.id, self.date))
    }

    fn availability_bonus(&self, employee: &Employee) -> f64 {
        let mut best = 0.0;
        for availability in self.availabilities {
            if !availability.covers(&employee.id, self.date) {
                continue;
            }
            let bonus = match availability.kind {
                AvailabilityKind::Preferred => PREFERRED_AVAILABILITY_BONUS,
                AvailabilityKind::Available => AVAILABLE_BONUS,
            };
            if bonus > best {
                best = bonus;
            }
        }
        best
    }
}

/// Filtre d'éligibilité d'un salarié pour un modèle, un jour donné.
pub(crate) fn eligibility(
    employee: &Employee,
    template: &ShiftTemplate,
    day: &DayContext<'_>,
) -> Result<(), Ineligibility> {
    if !employee.is_active {
        return Err(Ineligibility::Inactive);
    }
    if day.on_leave(employee) {
        return Err(Ineligibility::OnLeave);
    }
    if template.is_night() && !employee.can_work_nights {
        return Err(Ineligibility::NightNotAllowed);
    }
    if day.weekend && !employee.can_work_weekends {
        return Err(Ineligibility::WeekendNotAllowed);
    }
    if !employee.has_any_skill(&template.required_skills) {
        return Err(Ineligibility::MissingSkills);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ScoredCandidate<'a> {
    pub employee: &'a Employee,
    pub score: f64,
}

/// Note les candidats éligibles puis les trie par score décroissant.
///
/// Le tri est stable : à score égal, l'ordre des salariés en entrée est conservé.
pub(crate) fn rank_candidates<'a>(
    candidates: &[&'a Employee],
    template: &ShiftTemplate,
    day: &DayContext<'_>,
    workload: &WorkloadTracker,
    constraints: &ScheduleConstraints,
) -> Vec<ScoredCandidate<'a>> {
    let mean_hours = workload.mean_hours();
    let max_rate = candidates
        .iter()
        .map(|e| e.hourly_rate)
        .fold(0.0_f64, f64::max);

    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .iter()
        .map(|&employee| {
            let load = workload.get(&employee.id);
            let mut score = f64::from(employee.scheduling_priority) * PRIORITY_WEIGHT;

            if load.map_or(0.0, |w| w.total_hours) < mean_hours {
                score += BELOW_AVERAGE_BONUS;
            }
            if constraints.prioritize_availability {
                score += day.availability_bonus(employee);
            }
            if constraints.prioritize_cost_optimization && max_rate > 0.0 {
                score += (max_rate - employee.hourly_rate) / max_rate * COST_ADVANTAGE_WEIGHT;
            }
            if employee
                .preferred_shifts
                .iter()
                .any(|p| p.matches(template.shift_type))
            {
                score += PREFERRED_SHIFT_BONUS;
            }
            if load.map_or(0, |w| w.consecutive_days) > FATIGUE_THRESHOLD_DAYS {
                score -= FATIGUE_PENALTY;
            }

            ScoredCandidate { employee, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
