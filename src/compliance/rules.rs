use super::types::*;
use crate::model::{EmployeeId, Shift};
use crate::time;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Créneaux travaillés regroupés par salarié, triés par date puis heure de début.
fn by_employee(shifts: &[Shift]) -> BTreeMap<&EmployeeId, Vec<&Shift>> {
    let mut grouped: BTreeMap<&EmployeeId, Vec<&Shift>> = BTreeMap::new();
    for shift in shifts.iter().filter(|s| s.is_work()) {
        grouped.entry(&shift.employee_id).or_default().push(shift);
    }
    for list in grouped.values_mut() {
        list.sort_by_key(|s| (s.date, time::to_minutes(&s.start_time)));
    }
    grouped
}

fn overtime_hours(shift: &Shift) -> f64 {
    (shift.duration_hours() - OVERTIME_DAILY_THRESHOLD).max(0.0)
}

/// Repos quotidien : au moins 11h entre la fin d'un créneau et le début du suivant.
pub fn validate_daily_rest(shifts: &[Shift]) -> Vec<Violation> {
    let mut out = Vec::new();
    for (employee, list) in by_employee(shifts) {
        for pair in list.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let rest_minutes = (next.starts_at() - prev.ends_at()).num_minutes();
            let rest_hours = rest_minutes as f64 / 60.0;
            if rest_hours < MIN_DAILY_REST_HOURS {
                // tronqué : 10h59 s'affiche 10.9h, jamais 11.0h
                let shown = (rest_hours * 10.0).floor() / 10.0;
                out.push(
                    Violation::error(
                        Rule::DailyRest,
                        employee,
                        format!(
                            "Daily rest of {shown:.1}h between {} and {} is below the {MIN_DAILY_REST_HOURS}h minimum",
                            prev.date, next.date
                        ),
                    )
                    .on_shift(&next.id),
                );
            }
        }
    }
    out
}

/// Durée quotidienne : avertissement par créneau de plus de 8h.
pub fn validate_max_daily_hours(shifts: &[Shift]) -> Vec<Violation> {
    let mut out = Vec::new();
    for (employee, list) in by_employee(shifts) {
        for shift in list {
            let hours = shift.duration_hours();
            if hours > MAX_DAILY_HOURS {
                out.push(
                    Violation::warning(
                        Rule::MaxDailyHours,
                        employee,
                        format!(
                            "Shift on {} lasts {hours:.1}h, above the {MAX_DAILY_HOURS}h daily reference",
                            shift.date
                        ),
                    )
                    .on_shift(&shift.id),
                );
            }
        }
    }
    out
}

/// Durée hebdomadaire : un avertissement par semaine ISO au-delà de 40h.
pub fn validate_max_weekly_hours(shifts: &[Shift]) -> Vec<Violation> {
    let mut out = Vec::new();
    for (employee, list) in by_employee(shifts) {
        let mut weeks: BTreeMap<String, f64> = BTreeMap::new();
        for shift in list {
            *weeks.entry(time::week_key(shift.date)).or_default() += shift.duration_hours();
        }
        for (week, hours) in weeks {
            if hours > MAX_WEEKLY_HOURS {
                out.push(Violation::warning(
                    Rule::MaxWeeklyHours,
                    employee,
                    format!("Week {week} totals {hours:.1}h, above the {MAX_WEEKLY_HOURS}h weekly limit"),
                ));
            }
        }
    }
    out
}

/// Contingent d'heures supplémentaires sur la période évaluée.
pub fn validate_overtime(shifts: &[Shift], period: Period) -> Vec<Violation> {
    let ceiling = period.overtime_ceiling();
    let mut out = Vec::new();
    for (employee, list) in by_employee(shifts) {
        let total: f64 = list.iter().map(|s| overtime_hours(s)).sum();
        if total > ceiling {
            out.push(Violation::error(
                Rule::OvertimeCeiling,
                employee,
                format!("Overtime totals {total:.1}h, above the {ceiling}h ceiling for the period"),
            ));
        }
    }
    out
}

/// Travail de nuit : créneau de nuit > 8h (erreur), plus de 5 nuits d'affilée (avertissement).
pub fn validate_night_work(shifts: &[Shift]) -> Vec<Violation> {
    let mut out = Vec::new();
    for (employee, list) in by_employee(shifts) {
        let mut run = 0u32;
        for shift in list {
            if !shift.is_night() {
                run = 0;
                continue;
            }
            run += 1;

            let hours = shift.duration_hours();
            if hours > MAX_NIGHT_SHIFT_HOURS {
                out.push(
                    Violation::error(
                        Rule::NightWorkDuration,
                        employee,
                        format!(
                            "Night shift on {} lasts {hours:.1}h, above the {MAX_NIGHT_SHIFT_HOURS}h limit",
                            shift.date
                        ),
                    )
                    .on_shift(&shift.id),
                );
            }
            if run > MAX_CONSECUTIVE_NIGHTS {
                out.push(
                    Violation::warning(
                        Rule::ConsecutiveNights,
                        employee,
                        format!(
                            "{run} consecutive night shifts up to {}, above the {MAX_CONSECUTIVE_NIGHTS} recommended",
                            shift.date
                        ),
                    )
                    .on_shift(&shift.id),
                );
            }
        }
    }
    out
}

/// Repos hebdomadaire : pas plus de 6 jours travaillés d'affilée.
/// Une erreur par série trop longue, avec sa longueur.
pub fn validate_weekly_rest(shifts: &[Shift]) -> Vec<Violation> {
    let mut out = Vec::new();
    for (employee, list) in by_employee(shifts) {
        let mut days: Vec<NaiveDate> = list.iter().map(|s| s.date).collect();
        days.dedup();

        let mut flush = |streak: u32, last: Option<NaiveDate>| {
            if streak > MAX_CONSECUTIVE_WORK_DAYS {
                let last = last.map(|d| d.to_string()).unwrap_or_default();
                out.push(Violation::error(
                    Rule::WeeklyRest,
                    employee,
                    format!(
                        "{streak} consecutive working days ending {last} without weekly rest (maximum {MAX_CONSECUTIVE_WORK_DAYS})"
                    ),
                ));
            }
        };

        let mut streak = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for day in days {
            streak = match prev {
                Some(p) if (day - p).num_days() == 1 => streak + 1,
                _ => {
                    flush(streak, prev);
                    1
                }
            };
            prev = Some(day);
        }
        flush(streak, prev);
    }
    out
}
