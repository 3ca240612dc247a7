//! Génération gloutonne de plannings.
//!
//! Parcours jour par jour, modèle par modèle : filtrage des salariés éligibles,
//! score multi-critères, sélection des meilleurs dans la limite des plafonds
//! horaires. Le planning produit passe ensuite par le contrôle de conformité et
//! le chiffrage.
//!
//! Une génération est strictement séquentielle : chaque affectation met à jour
//! l'accumulateur de charge que lit le score de la décision suivante. Des
//! générations indépendantes peuvent tourner en parallèle, chacune ayant son
//! propre accumulateur.

mod analysis;
mod scoring;
mod staffing;
mod types;
mod workload;

pub use analysis::optimize_existing_schedule;
pub use staffing::staffing_need;
pub use types::*;
pub use workload::EmployeeWorkload;

use crate::compliance::validate_schedule;
use crate::cost::calculate_schedule_cost;
use crate::model::{Employee, Shift, ShiftTemplate};
use chrono::{NaiveDate, Utc};
use scoring::DayContext;
use std::time::Instant;
use workload::WorkloadTracker;

pub const ALGORITHM: &str = "greedy-multi-criteria";

#[derive(Debug, Default)]
struct SkipCounters {
    ineligible: u32,
    over_limit: u32,
}

impl SkipCounters {
    fn record(&mut self, employee: &Employee, template: &ShiftTemplate, date: NaiveDate, outcome: &CandidateOutcome) {
        match outcome {
            CandidateOutcome::Assigned(_) => {}
            CandidateOutcome::SkippedIneligible(reason) => {
                self.ineligible += 1;
                tracing::trace!(
                    employee = employee.id.as_str(),
                    template = template.name.as_str(),
                    %date,
                    ?reason,
                    "candidate ineligible"
                );
            }
            CandidateOutcome::SkippedOverLimit(limit) => {
                self.over_limit += 1;
                tracing::debug!(
                    employee = employee.id.as_str(),
                    template = template.name.as_str(),
                    %date,
                    ?limit,
                    "candidate skipped, hour limit reached"
                );
            }
        }
    }
}

/// Génère un planning sur `[start_date, end_date]` puis le contrôle et le chiffre.
///
/// Échoue sans résultat partiel si une entrée obligatoire manque, ou si la
/// génération est annulée ou dépasse sa limite de temps.
pub fn generate_intelligent_schedule(
    request: &GenerationRequest<'_>,
) -> Result<GenerationResult, GenerationError> {
    if request.employees.is_empty() {
        return Err(GenerationError::NoEmployees);
    }
    let start = request.start_date.ok_or(GenerationError::MissingStartDate)?;
    let end = request.end_date.ok_or(GenerationError::MissingEndDate)?;
    if request.templates.is_empty() {
        return Err(GenerationError::NoTemplates);
    }
    if end < start {
        return Err(GenerationError::InvalidDateRange { start, end });
    }

    let started = Instant::now();
    let mut workload = WorkloadTracker::new(request.employees);
    let mut skipped = SkipCounters::default();
    let mut schedule = Vec::new();
    let mut days = Vec::new();
    let mut total_days = 0u32;
    let mut current = start;

    loop {
        checkpoint(request, started, current)?;
        total_days += 1;

        let day = DayContext::new(current, request.availabilities, request.leaves);
        if day.weekend && !request.constraints.allow_weekend_work {
            tracing::debug!(date = %current, "weekend work disabled, day skipped");
        } else {
            let need = staffing_need(current, request.forecast, &request.constraints);
            let assigned = fill_day(request, &day, need, &mut workload, &mut skipped, &mut schedule);
            days.push(DayStaffing {
                date: current,
                required: need,
                assigned,
            });
        }

        if current == end {
            break;
        }
        current = current
            .succ_opt()
            .ok_or(GenerationError::DateOverflow(current))?;
    }

    let validation = validate_schedule(&schedule, &request.validation);
    let costs = calculate_schedule_cost(&schedule, request.employees, &request.cost);
    let budget_status = request.budget.map(|budget| BudgetStatus {
        budget,
        actual_cost: costs.total_cost,
        within_budget: costs.total_cost <= budget,
        difference: budget - costs.total_cost,
    });

    if schedule.is_empty() {
        tracing::warn!(%start, %end, "generated schedule is empty");
    }

    let metadata = GenerationMetadata {
        generated_at: Utc::now(),
        algorithm: ALGORITHM,
        start_date: start,
        end_date: end,
        total_days,
        scheduled_days: days.len() as u32,
        total_shifts: schedule.len(),
        employees_considered: request.employees.len(),
        templates_used: request.templates.len(),
        skipped_ineligible: skipped.ineligible,
        skipped_over_limit: skipped.over_limit,
    };

    tracing::info!(
        %start,
        %end,
        shifts = metadata.total_shifts,
        errors = validation.summary.errors,
        cost = costs.total_cost,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "schedule generated"
    );

    Ok(GenerationResult {
        schedule,
        validation,
        costs,
        budget_status,
        staffing_analysis: StaffingAnalysis::from_days(days),
        employee_workload: workload.into_inner(),
        metadata,
    })
}

fn checkpoint(
    request: &GenerationRequest<'_>,
    started: Instant,
    day: NaiveDate,
) -> Result<(), GenerationError> {
    if request
        .cancellation
        .as_ref()
        .is_some_and(CancellationToken::is_cancelled)
    {
        return Err(GenerationError::Cancelled(day));
    }
    if let Some(limit) = request.time_limit {
        if started.elapsed() > limit {
            return Err(GenerationError::TimedOut { limit, day });
        }
    }
    Ok(())
}

/// Remplit une journée ; renvoie le nombre d'affectations.
fn fill_day(
    request: &GenerationRequest<'_>,
    day: &DayContext<'_>,
    need: u32,
    workload: &mut WorkloadTracker,
    skipped: &mut SkipCounters,
    schedule: &mut Vec<Shift>,
) -> u32 {
    let constraints = &request.constraints;
    let mut assigned_today = 0u32;

    for template in request.templates {
        if assigned_today >= need {
            break;
        }
        if template.is_night() && !constraints.allow_night_shifts {
            continue;
        }

        let mut eligible = Vec::new();
        for employee in request.employees {
            match scoring::eligibility(employee, template, day) {
                Ok(()) => eligible.push(employee),
                Err(reason) => skipped.record(
                    employee,
                    template,
                    day.date,
                    &CandidateOutcome::SkippedIneligible(reason),
                ),
            }
        }

        let ranked = scoring::rank_candidates(&eligible, template, day, workload, constraints);
        let take = constraints
            .max_staff_per_shift
            .min(need)
            .min(template.required_staff) as usize;

        for candidate in ranked.into_iter().take(take) {
            let outcome = try_assign(candidate.employee, template, day.date, workload, constraints);
            match outcome {
                CandidateOutcome::Assigned(shift) => {
                    schedule.push(shift);
                    assigned_today += 1;
                }
                other => skipped.record(candidate.employee, template, day.date, &other),
            }
        }
    }

    assigned_today
}

fn try_assign(
    employee: &Employee,
    template: &ShiftTemplate,
    date: NaiveDate,
    workload: &mut WorkloadTracker,
    constraints: &ScheduleConstraints,
) -> CandidateOutcome {
    let hours = template.duration_hours();
    if let Err(limit) = workload.check_limits(employee, date, hours, constraints.allow_overtime) {
        return CandidateOutcome::SkippedOverLimit(limit);
    }

    let mut shift = Shift::new(
        employee.id.clone(),
        date,
        template.start_time.clone(),
        template.end_time.clone(),
    );
    shift.notes = Some(format!("{} ({})", template.name, template.shift_type.as_str()));
    workload.record(&employee.id, date, hours);
    CandidateOutcome::Assigned(shift)
}
