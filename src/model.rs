use crate::time;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid time `{0}`: expected HH:MM")]
    InvalidTime(String),
    #[error("invalid date range: end must not be before start")]
    InvalidDateRange,
    #[error("scheduling priority must be within 1..=10, got {0}")]
    PriorityOutOfRange(u8),
    #[error("hourly rate must be a finite, non-negative amount")]
    InvalidRate,
}

/// Identifiant fort pour Employee
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Type de créneau souhaité par un salarié.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferredShift {
    Morning,
    Afternoon,
    Night,
    FullDay,
}

impl PreferredShift {
    /// Correspondance par nom : `full-day` n'a pas d'équivalent côté modèle.
    pub fn matches(self, shift_type: ShiftType) -> bool {
        matches!(
            (self, shift_type),
            (Self::Morning, ShiftType::Morning)
                | (Self::Afternoon, ShiftType::Afternoon)
                | (Self::Night, ShiftType::Night)
        )
    }
}

fn default_true() -> bool {
    true
}
fn default_max_hours_per_day() -> f64 {
    12.0
}
fn default_max_hours_per_week() -> f64 {
    60.0
}
fn default_priority() -> u8 {
    5
}

/// Salarié planifiable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub hourly_rate: f64,
    #[serde(default = "default_max_hours_per_day")]
    pub max_hours_per_day: f64,
    #[serde(default = "default_max_hours_per_week")]
    pub max_hours_per_week: f64,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default = "default_true")]
    pub can_work_nights: bool,
    #[serde(default = "default_true")]
    pub can_work_weekends: bool,
    #[serde(default)]
    pub preferred_shifts: BTreeSet<PreferredShift>,
    /// 1..=10, plus haut = prioritaire.
    #[serde(default = "default_priority")]
    pub scheduling_priority: u8,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Employee {
    pub fn new<I: AsRef<str>, N: Into<String>>(
        id: I,
        name: N,
        hourly_rate: f64,
    ) -> Result<Self, ModelError> {
        if !hourly_rate.is_finite() || hourly_rate < 0.0 {
            return Err(ModelError::InvalidRate);
        }
        Ok(Self {
            id: EmployeeId::new(id),
            name: name.into(),
            hourly_rate,
            max_hours_per_day: default_max_hours_per_day(),
            max_hours_per_week: default_max_hours_per_week(),
            skills: BTreeSet::new(),
            can_work_nights: true,
            can_work_weekends: true,
            preferred_shifts: BTreeSet::new(),
            scheduling_priority: default_priority(),
            is_active: true,
        })
    }

    pub fn with_priority(mut self, priority: u8) -> Result<Self, ModelError> {
        if !(1..=10).contains(&priority) {
            return Err(ModelError::PriorityOutOfRange(priority));
        }
        self.scheduling_priority = priority;
        Ok(self)
    }

    pub fn has_any_skill(&self, required: &BTreeSet<String>) -> bool {
        required.is_empty() || required.iter().any(|s| self.skills.contains(s))
    }
}

/// Type de modèle de créneau
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Afternoon,
    Evening,
    Night,
    #[default]
    Custom,
}

impl ShiftType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::Custom => "custom",
        }
    }
}

fn default_required_staff() -> u32 {
    1
}

/// Modèle de créneau récurrent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTemplate {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub shift_type: ShiftType,
    #[serde(default = "default_required_staff")]
    pub required_staff: u32,
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
}

impl ShiftTemplate {
    /// Crée un modèle en validant les heures "HH:MM".
    pub fn new<N: Into<String>>(
        name: N,
        start_time: &str,
        end_time: &str,
        shift_type: ShiftType,
        required_staff: u32,
    ) -> Result<Self, ModelError> {
        for t in [start_time, end_time] {
            if time::parse_time(t).is_none() {
                return Err(ModelError::InvalidTime(t.to_string()));
            }
        }
        Ok(Self {
            name: name.into(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            shift_type,
            required_staff,
            required_skills: BTreeSet::new(),
        })
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn duration_hours(&self) -> f64 {
        time::shift_duration_hours(&self.start_time, &self.end_time)
    }

    /// Modèle typé nuit, ou dont les horaires tombent dans la règle de nuit.
    pub fn is_night(&self) -> bool {
        self.shift_type == ShiftType::Night || time::is_night_shift(&self.start_time, &self.end_time)
    }
}

/// Nature d'une entrée de planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    #[default]
    #[serde(rename = "shift")]
    Work,
    Leave,
    Off,
    Sick,
    Holiday,
}

/// Entrée de planning (générée ou persistée)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(default = "ShiftId::random")]
    pub id: ShiftId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type", default)]
    pub kind: ShiftKind,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Shift {
    pub fn new<S: Into<String>, E: Into<String>>(
        employee_id: EmployeeId,
        date: NaiveDate,
        start_time: S,
        end_time: E,
    ) -> Self {
        Self {
            id: ShiftId::random(),
            employee_id,
            date,
            start_time: start_time.into(),
            end_time: end_time.into(),
            kind: ShiftKind::Work,
            is_holiday: false,
            notes: None,
        }
    }

    pub fn holiday(mut self) -> Self {
        self.is_holiday = true;
        self
    }

    pub fn is_work(&self) -> bool {
        self.kind == ShiftKind::Work
    }

    pub fn duration_hours(&self) -> f64 {
        time::shift_duration_hours(&self.start_time, &self.end_time)
    }

    pub fn is_night(&self) -> bool {
        time::is_night_shift(&self.start_time, &self.end_time)
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        time::shift_bounds(self.date, &self.start_time, &self.end_time).0
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        time::shift_bounds(self.date, &self.start_time, &self.end_time).1
    }
}

/// Statut de validation d'une demande (disponibilité, congé)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityKind {
    Preferred,
    Available,
}

/// Disponibilité déclarée sur une période [start_date, end_date].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 0 = dimanche … 6 = samedi ; vide = tous les jours.
    #[serde(default)]
    pub days_of_week: BTreeSet<u8>,
    #[serde(rename = "type")]
    pub kind: AvailabilityKind,
    #[serde(default)]
    pub status: ApprovalStatus,
}

impl Availability {
    pub fn new(
        employee_id: EmployeeId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        kind: AvailabilityKind,
    ) -> Result<Self, ModelError> {
        if end_date < start_date {
            return Err(ModelError::InvalidDateRange);
        }
        Ok(Self {
            employee_id,
            start_date,
            end_date,
            days_of_week: BTreeSet::new(),
            kind,
            status: ApprovalStatus::Approved,
        })
    }

    /// Seules les disponibilités approuvées comptent.
    pub fn covers(&self, employee: &EmployeeId, date: NaiveDate) -> bool {
        self.status == ApprovalStatus::Approved
            && &self.employee_id == employee
            && self.start_date <= date
            && date <= self.end_date
            && (self.days_of_week.is_empty()
                || self.days_of_week.contains(&time::day_of_week(date)))
    }
}

/// Congé sur une période [start_date, end_date].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: ApprovalStatus,
}

impl Leave {
    pub fn new(
        employee_id: EmployeeId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ModelError> {
        if end_date < start_date {
            return Err(ModelError::InvalidDateRange);
        }
        Ok(Self {
            employee_id,
            start_date,
            end_date,
            status: ApprovalStatus::Approved,
        })
    }

    /// Seuls les congés approuvés bloquent l'affectation.
    pub fn blocks(&self, employee: &EmployeeId, date: NaiveDate) -> bool {
        self.status == ApprovalStatus::Approved
            && &self.employee_id == employee
            && self.start_date <= date
            && date <= self.end_date
    }
}
