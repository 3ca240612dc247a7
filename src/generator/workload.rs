use super::types::LimitKind;
use crate::compliance::OVERTIME_DAILY_THRESHOLD;
use crate::model::{Employee, EmployeeId};
use crate::time;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Compteurs d'un salarié pendant une génération (jamais persistés).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWorkload {
    pub total_hours: f64,
    pub shifts: u32,
    pub consecutive_days: u32,
    pub last_shift_date: Option<NaiveDate>,
    #[serde(skip)]
    daily_hours: HashMap<NaiveDate, f64>,
    #[serde(skip)]
    weekly_hours: HashMap<String, f64>,
}

impl EmployeeWorkload {
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        self.daily_hours.get(&date).copied().unwrap_or(0.0)
    }

    pub fn hours_in_week_of(&self, date: NaiveDate) -> f64 {
        self.weekly_hours
            .get(&time::week_key(date))
            .copied()
            .unwrap_or(0.0)
    }

    fn record(&mut self, date: NaiveDate, hours: f64) {
        self.consecutive_days = match self.last_shift_date {
            Some(last) if last == date => self.consecutive_days,
            Some(last) if (date - last).num_days() == 1 => self.consecutive_days + 1,
            _ => 1,
        };
        self.total_hours += hours;
        self.shifts += 1;
        self.last_shift_date = Some(date);
        *self.daily_hours.entry(date).or_default() += hours;
        *self.weekly_hours.entry(time::week_key(date)).or_default() += hours;
    }
}

/// Accumulateur propre à une génération, lu par le score et mis à jour à chaque affectation.
#[derive(Debug, Default)]
pub(crate) struct WorkloadTracker {
    entries: BTreeMap<EmployeeId, EmployeeWorkload>,
}

impl WorkloadTracker {
    pub(crate) fn new(employees: &[Employee]) -> Self {
        let entries = employees
            .iter()
            .map(|e| (e.id.clone(), EmployeeWorkload::default()))
            .collect();
        Self { entries }
    }

    pub(crate) fn get(&self, id: &EmployeeId) -> Option<&EmployeeWorkload> {
        self.entries.get(id)
    }

    /// Moyenne des heures cumulées sur tous les salariés suivis.
    pub(crate) fn mean_hours(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: f64 = self.entries.values().map(|w| w.total_hours).sum();
        total / self.entries.len() as f64
    }

    /// Vérifie les plafonds jour/semaine du salarié et l'interdiction d'heures sup.
    pub(crate) fn check_limits(
        &self,
        employee: &Employee,
        date: NaiveDate,
        hours: f64,
        allow_overtime: bool,
    ) -> Result<(), LimitKind> {
        let (day, week) = self
            .get(&employee.id)
            .map(|w| (w.hours_on(date), w.hours_in_week_of(date)))
            .unwrap_or((0.0, 0.0));

        if day + hours > employee.max_hours_per_day {
            return Err(LimitKind::DailyHours);
        }
        if week + hours > employee.max_hours_per_week {
            return Err(LimitKind::WeeklyHours);
        }
        if !allow_overtime && day + hours > OVERTIME_DAILY_THRESHOLD {
            return Err(LimitKind::Overtime);
        }
        Ok(())
    }

    pub(crate) fn record(&mut self, id: &EmployeeId, date: NaiveDate, hours: f64) {
        self.entries.entry(id.clone()).or_default().record(date, hours);
    }

    pub(crate) fn into_inner(self) -> BTreeMap<EmployeeId, EmployeeWorkload> {
        self.entries
    }
}
