#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate};
use roulement::compliance::{
    validate_daily_rest, validate_night_work, validate_overtime, validate_schedule,
    validate_weekly_rest, Period, Rule, Severity, ValidationOptions,
};
use roulement::model::{EmployeeId, Shift, ShiftKind};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn shift(emp: &str, date: &str, start: &str, end: &str) -> Shift {
    Shift::new(EmployeeId::new(emp), d(date), start, end)
}

/// Un créneau par jour pendant `days` jours à partir de `first`.
fn daily_run(emp: &str, first: &str, days: i64, start: &str, end: &str) -> Vec<Shift> {
    (0..days)
        .map(|i| {
            let date = d(first) + Duration::days(i);
            Shift::new(EmployeeId::new(emp), date, start, end)
        })
        .collect()
}

fn count(report: &roulement::ValidationReport, rule: Rule) -> usize {
    report.violations.iter().filter(|v| v.rule == rule).count()
}

#[test]
fn daily_rest_boundary_is_eleven_hours() {
    let ok = vec![
        shift("alice", "2025-03-03", "13:00", "22:00"),
        shift("alice", "2025-03-04", "09:00", "17:00"),
    ];
    assert!(validate_daily_rest(&ok).is_empty());

    let short = vec![
        shift("alice", "2025-03-03", "13:00", "22:00"),
        shift("alice", "2025-03-04", "08:59", "17:00"),
    ];
    let violations = validate_daily_rest(&short);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity, Severity::Error);
    assert_eq!(violations[0].article, "L3131-1");
    assert_eq!(violations[0].shift_ref.as_ref(), Some(&short[1].id));
}

#[test]
fn daily_rest_just_under_minimum_never_shows_eleven_hours() {
    let shifts = vec![
        shift("alice", "2025-03-03", "13:00", "22:00"),
        shift("alice", "2025-03-04", "08:59", "17:00"),
    ];
    let violations = validate_daily_rest(&shifts);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.starts_with("Daily rest of 10.9h"));
}

#[test]
fn daily_rest_message_reports_actual_hours() {
    let shifts = vec![
        shift("alice", "2025-03-04", "07:00", "15:00"),
        shift("alice", "2025-03-03", "14:00", "22:00"),
    ];
    let violations = validate_daily_rest(&shifts);
    assert_eq!(violations.len(), 1);
    insta::assert_snapshot!(
        &violations[0].message,
        @"Daily rest of 9.0h between 2025-03-03 and 2025-03-04 is below the 11h minimum"
    );
}

#[test]
fn daily_rest_is_checked_per_employee() {
    let shifts = vec![
        shift("alice", "2025-03-03", "14:00", "22:00"),
        shift("bob", "2025-03-04", "06:00", "14:00"),
    ];
    assert!(validate_daily_rest(&shifts).is_empty());
}

#[test]
fn long_shift_is_a_warning_only() {
    let shifts = vec![shift("alice", "2025-03-03", "08:00", "17:00")];
    let report = validate_schedule(&shifts, &ValidationOptions::default());
    assert!(report.is_valid);
    assert_eq!(count(&report, Rule::MaxDailyHours), 1);
    assert_eq!(report.summary.warnings, 1);
    assert_eq!(report.summary.errors, 0);
}

#[test]
fn weekly_hours_warn_once_per_week() {
    // lundi → vendredi, 9h par jour = 45h
    let shifts = daily_run("alice", "2025-03-03", 5, "08:00", "17:00");
    let report = validate_schedule(&shifts, &ValidationOptions::default());
    assert_eq!(count(&report, Rule::MaxWeeklyHours), 1);
    assert_eq!(count(&report, Rule::MaxDailyHours), 5);
    assert!(report.is_valid);
}

#[test]
fn small_overtime_stays_under_monthly_ceiling() {
    let mut shifts = daily_run("alice", "2025-03-03", 3, "08:00", "17:00");
    shifts.push(shift("alice", "2025-03-06", "08:00", "18:00"));
    assert!(validate_overtime(&shifts, Period::Month).is_empty());
}

#[test]
fn overtime_ceiling_depends_on_period() {
    // 13 créneaux de 12h = 52h d'heures sup
    let shifts: Vec<Shift> = (0..13)
        .map(|i| {
            let date = d("2025-03-01") + Duration::days(i * 2);
            Shift::new(EmployeeId::new("alice"), date, "07:00", "19:00")
        })
        .collect();

    let monthly = validate_overtime(&shifts, Period::Month);
    assert_eq!(monthly.len(), 1);
    assert!(monthly[0].is_error());
    assert!(monthly[0].message.contains("52.0h"));

    assert!(validate_overtime(&shifts, Period::Year).is_empty());
}

#[test]
fn long_night_shift_is_an_error() {
    let shifts = vec![shift("alice", "2025-03-03", "22:00", "07:00")];
    let violations = validate_night_work(&shifts);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, Rule::NightWorkDuration);
    assert!(violations[0].is_error());
}

#[test]
fn consecutive_nights_warn_beyond_five() {
    let six = daily_run("alice", "2025-03-03", 6, "22:00", "06:00");
    let violations = validate_night_work(&six);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, Rule::ConsecutiveNights);
    assert_eq!(violations[0].severity, Severity::Warning);

    let seven = daily_run("alice", "2025-03-03", 7, "22:00", "06:00");
    assert_eq!(validate_night_work(&seven).len(), 2);
}

#[test]
fn day_shift_resets_night_run() {
    let mut shifts = daily_run("alice", "2025-03-03", 3, "22:00", "06:00");
    shifts.push(shift("alice", "2025-03-06", "14:00", "20:00"));
    shifts.extend(daily_run("alice", "2025-03-07", 3, "22:00", "06:00"));
    assert!(validate_night_work(&shifts).is_empty());
}

#[test]
fn seventh_consecutive_day_breaks_weekly_rest() {
    let six = daily_run("alice", "2025-03-03", 6, "09:00", "17:00");
    assert!(validate_weekly_rest(&six).is_empty());

    let seven = daily_run("alice", "2025-03-03", 7, "09:00", "17:00");
    let violations = validate_weekly_rest(&seven);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.starts_with("7 consecutive working days"));
    assert_eq!(violations[0].article, "L3132-1");
}

#[test]
fn nine_day_streak_is_one_error() {
    let nine = daily_run("alice", "2025-03-03", 9, "09:00", "17:00");
    let violations = validate_weekly_rest(&nine);
    assert_eq!(violations.len(), 1);
    insta::assert_snapshot!(
        &violations[0].message,
        @"9 consecutive working days ending 2025-03-11 without weekly rest (maximum 6)"
    );
}

#[test]
fn same_day_shifts_do_not_reset_streak() {
    let mut shifts = daily_run("alice", "2025-03-03", 7, "06:00", "10:00");
    shifts.push(shift("alice", "2025-03-05", "18:00", "21:00"));
    assert_eq!(validate_weekly_rest(&shifts).len(), 1);
}

#[test]
fn non_work_entries_are_ignored() {
    let mut shifts = daily_run("alice", "2025-03-03", 3, "09:00", "15:00");
    let mut leave = shift("alice", "2025-03-06", "00:00", "23:59");
    leave.kind = ShiftKind::Leave;
    shifts.push(leave);
    shifts.extend(daily_run("alice", "2025-03-07", 4, "09:00", "15:00"));
    // jour de congé au milieu : deux séries de 3 et 4 jours, rien de plus
    let report = validate_schedule(&shifts, &ValidationOptions::default());
    assert!(report.violations.is_empty());
}

#[test]
fn toggles_disable_rules() {
    let shifts = vec![
        shift("alice", "2025-03-03", "14:00", "23:00"),
        shift("alice", "2025-03-04", "06:00", "14:00"),
    ];
    let all_off = ValidationOptions {
        check_daily_rest: false,
        check_max_hours: false,
        check_overtime: false,
        check_night_work: false,
        check_weekly_rest: false,
        ..ValidationOptions::default()
    };
    let report = validate_schedule(&shifts, &all_off);
    assert!(report.is_valid);
    assert_eq!(report.summary.total, 0);

    let report = validate_schedule(&shifts, &ValidationOptions::default());
    assert!(!report.is_valid);
    assert_eq!(report.summary.errors, count(&report, Rule::DailyRest));
    assert_eq!(
        report.summary.total,
        report.summary.errors + report.summary.warnings
    );
}
