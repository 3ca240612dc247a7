use crate::model::{EmployeeId, ShiftId};
use serde::{Deserialize, Serialize};

pub const MIN_DAILY_REST_HOURS: f64 = 11.0;
pub const MAX_DAILY_HOURS: f64 = 8.0;
pub const MAX_WEEKLY_HOURS: f64 = 40.0;
/// Seuil quotidien au-delà duquel les heures comptent en heures supplémentaires.
pub const OVERTIME_DAILY_THRESHOLD: f64 = 8.0;
pub const MONTHLY_OVERTIME_CEILING: f64 = 48.0;
pub const YEARLY_OVERTIME_CEILING: f64 = 150.0;
pub const MAX_NIGHT_SHIFT_HOURS: f64 = 8.0;
pub const MAX_CONSECUTIVE_NIGHTS: u32 = 5;
pub const MAX_CONSECUTIVE_WORK_DAYS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    DailyRest,
    MaxDailyHours,
    MaxWeeklyHours,
    OvertimeCeiling,
    NightWorkDuration,
    ConsecutiveNights,
    WeeklyRest,
}

impl Rule {
    /// Article du Code du travail cité par la violation.
    pub fn article(self) -> &'static str {
        match self {
            Self::DailyRest => "L3131-1",
            Self::MaxDailyHours => "L3121-18",
            Self::MaxWeeklyHours => "L3121-27",
            Self::OvertimeCeiling => "L3121-30",
            Self::NightWorkDuration => "L3122-6",
            Self::ConsecutiveNights => "L3122-5",
            Self::WeeklyRest => "L3132-1",
        }
    }
}

/// Période sur laquelle le plafond d'heures supplémentaires s'applique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn overtime_ceiling(self) -> f64 {
        match self {
            Self::Month => MONTHLY_OVERTIME_CEILING,
            Self::Year => YEARLY_OVERTIME_CEILING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
    pub article: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_ref: Option<ShiftId>,
}

impl Violation {
    pub(crate) fn new(rule: Rule, severity: Severity, employee: &EmployeeId, message: String) -> Self {
        Self {
            rule,
            severity,
            message,
            article: rule.article().to_string(),
            employee_id: Some(employee.clone()),
            shift_ref: None,
        }
    }

    pub(crate) fn error(rule: Rule, employee: &EmployeeId, message: String) -> Self {
        Self::new(rule, Severity::Error, employee, message)
    }

    pub(crate) fn warning(rule: Rule, employee: &EmployeeId, message: String) -> Self {
        Self::new(rule, Severity::Warning, employee, message)
    }

    pub(crate) fn on_shift(mut self, shift: &ShiftId) -> Self {
        self.shift_ref = Some(shift.clone());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Règles activées pour un contrôle ; toutes actives par défaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    pub check_daily_rest: bool,
    /// Couvre les plafonds quotidien et hebdomadaire.
    pub check_max_hours: bool,
    pub check_overtime: bool,
    pub check_night_work: bool,
    pub check_weekly_rest: bool,
    pub period: Period,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_daily_rest: true,
            check_max_hours: true,
            check_overtime: true,
            check_night_work: true,
            check_weekly_rest: true,
            period: Period::Month,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let errors = violations.iter().filter(|v| v.is_error()).count();
        let summary = ValidationSummary {
            total: violations.len(),
            errors,
            warnings: violations.len() - errors,
        };
        Self {
            is_valid: errors == 0,
            violations,
            summary,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }
}
