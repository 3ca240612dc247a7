use super::workload::EmployeeWorkload;
use crate::compliance::{ValidationOptions, ValidationReport};
use crate::cost::{CostOptions, ScheduleCost, Suggestion};
use crate::model::{Availability, Employee, EmployeeId, Leave, Shift, ShiftTemplate};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no employees provided")]
    NoEmployees,
    #[error("missing start date")]
    MissingStartDate,
    #[error("missing end date")]
    MissingEndDate,
    #[error("no shift templates provided")]
    NoTemplates,
    #[error("invalid date range: {end} is before {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("generation cancelled on {0}")]
    Cancelled(NaiveDate),
    #[error("generation exceeded its {limit:?} time limit on {day}")]
    TimedOut { limit: Duration, day: NaiveDate },
    #[error("date overflow after {0}")]
    DateOverflow(NaiveDate),
}

/// Contraintes de génération
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleConstraints {
    pub max_staff_per_shift: u32,
    /// Effectif par défaut quand aucune prévision ne couvre le jour.
    pub preferred_staff_per_shift: u32,
    pub allow_overtime: bool,
    pub allow_night_shifts: bool,
    pub allow_weekend_work: bool,
    pub prioritize_availability: bool,
    pub prioritize_cost_optimization: bool,
}

impl Default for ScheduleConstraints {
    fn default() -> Self {
        Self {
            max_staff_per_shift: 10,
            preferred_staff_per_shift: 2,
            allow_overtime: true,
            allow_night_shifts: true,
            allow_weekend_work: true,
            prioritize_availability: true,
            prioritize_cost_optimization: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingForecast {
    pub required_staff: u32,
}

/// Besoins d'effectif fournis par un prévisionnel externe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastData {
    pub daily: BTreeMap<NaiveDate, StaffingForecast>,
    /// 0 = dimanche … 6 = samedi
    pub by_day_of_week: BTreeMap<u8, StaffingForecast>,
}

/// Jeton d'annulation coopérative, vérifié à chaque changement de jour.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Paramètres d'une génération. Les collections sont des instantanés en lecture seule.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub employees: &'a [Employee],
    pub templates: &'a [ShiftTemplate],
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub constraints: ScheduleConstraints,
    pub availabilities: &'a [Availability],
    pub leaves: &'a [Leave],
    pub forecast: Option<&'a ForecastData>,
    pub budget: Option<f64>,
    pub validation: ValidationOptions,
    pub cost: CostOptions,
    pub cancellation: Option<CancellationToken>,
    pub time_limit: Option<Duration>,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(
        employees: &'a [Employee],
        templates: &'a [ShiftTemplate],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employees,
            templates,
            start_date: Some(start_date),
            end_date: Some(end_date),
            constraints: ScheduleConstraints::default(),
            availabilities: &[],
            leaves: &[],
            forecast: None,
            budget: None,
            validation: ValidationOptions::default(),
            cost: CostOptions::default(),
            cancellation: None,
            time_limit: None,
        }
    }

    pub fn with_constraints(mut self, constraints: ScheduleConstraints) -> Self {
        self.constraints = constraints;
        self
    }
    pub fn with_availabilities(mut self, availabilities: &'a [Availability]) -> Self {
        self.availabilities = availabilities;
        self
    }
    pub fn with_leaves(mut self, leaves: &'a [Leave]) -> Self {
        self.leaves = leaves;
        self
    }
    pub fn with_forecast(mut self, forecast: &'a ForecastData) -> Self {
        self.forecast = Some(forecast);
        self
    }
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Raison d'écarter un salarié avant le score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ineligibility {
    Inactive,
    OnLeave,
    NightNotAllowed,
    WeekendNotAllowed,
    MissingSkills,
}

/// Plafond dépassé par une affectation retenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitKind {
    DailyHours,
    WeeklyHours,
    Overtime,
}

/// Issue d'une décision d'affectation ; aucune n'interrompt la génération.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    Assigned(Shift),
    SkippedIneligible(Ineligibility),
    SkippedOverLimit(LimitKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: f64,
    pub actual_cost: f64,
    pub within_budget: bool,
    /// budget - coût réel (négatif en cas de dépassement).
    pub difference: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStaffing {
    pub date: NaiveDate,
    pub required: u32,
    pub assigned: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingAnalysis {
    pub days: Vec<DayStaffing>,
    pub total_required: u32,
    pub total_assigned: u32,
    pub understaffed_days: u32,
    /// assigned / required, 1.0 sans besoin exprimé.
    pub coverage_rate: f64,
}

impl StaffingAnalysis {
    pub(crate) fn from_days(days: Vec<DayStaffing>) -> Self {
        let total_required = days.iter().map(|d| d.required).sum();
        let total_assigned = days.iter().map(|d| d.assigned).sum();
        let understaffed_days = days.iter().filter(|d| d.assigned < d.required).count() as u32;
        let coverage_rate = if total_required == 0 {
            1.0
        } else {
            f64::from(total_assigned) / f64::from(total_required)
        };
        Self {
            days,
            total_required,
            total_assigned,
            understaffed_days,
            coverage_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    pub algorithm: &'static str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: u32,
    pub scheduled_days: u32,
    pub total_shifts: usize,
    pub employees_considered: usize,
    pub templates_used: usize,
    pub skipped_ineligible: u32,
    pub skipped_over_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub schedule: Vec<Shift>,
    pub validation: ValidationReport,
    pub costs: ScheduleCost,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_status: Option<BudgetStatus>,
    pub staffing_analysis: StaffingAnalysis,
    pub employee_workload: BTreeMap<EmployeeId, EmployeeWorkload>,
    pub metadata: GenerationMetadata,
}

/// Contraintes d'analyse d'un planning existant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConstraints {
    pub budget: Option<f64>,
    pub validation: ValidationOptions,
    pub cost: CostOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAnalysis {
    pub validation: ValidationReport,
    pub costs: ScheduleCost,
    pub suggestions: Vec<Suggestion>,
    /// Coefficient de variation des heures par salarié.
    pub workload_variance: f64,
    /// 0..=100
    pub optimization_score: f64,
}
