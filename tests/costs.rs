#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate};
use roulement::cost::{
    calculate_schedule_cost, calculate_shift_cost, forecast_costs, optimize_costs, Confidence,
    CostOptions, Priority, SuggestionKind,
};
use roulement::model::{Employee, EmployeeId, Shift};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn employee(id: &str, rate: f64) -> Employee {
    Employee::new(id, id.to_uppercase(), rate).unwrap()
}

fn shift(emp: &str, date: &str, start: &str, end: &str) -> Shift {
    Shift::new(EmployeeId::new(emp), d(date), start, end)
}

#[test]
fn premiums_stack_on_night_weekend_holiday_overtime() {
    // samedi, 22:00 → 08:00 = 10h
    let s = shift("alice", "2025-03-08", "22:00", "08:00").holiday();
    let c = calculate_shift_cost(&s, &employee("alice", 20.0), &CostOptions::default());

    assert!(approx(c.base_hours, 10.0));
    assert!(approx(c.base_cost, 200.0));
    assert!(approx(c.overtime_hours, 2.0));
    assert!(approx(c.overtime_cost, 20.0));
    assert!(approx(c.night_shift_bonus, 40.0));
    assert!(approx(c.weekend_bonus, 100.0));
    assert!(approx(c.holiday_bonus, 200.0));
    assert!(approx(c.total_cost, 560.0));
    assert!(approx(
        c.total_cost,
        c.base_cost + c.overtime_cost + c.night_shift_bonus + c.weekend_bonus + c.holiday_bonus
    ));
}

#[test]
fn plain_weekday_shift_costs_base_only() {
    let s = shift("alice", "2025-03-04", "09:00", "17:00");
    let c = calculate_shift_cost(&s, &employee("alice", 15.0), &CostOptions::default());
    assert!(approx(c.total_cost, 120.0));
    assert_eq!(c.overtime_hours, 0.0);
    assert_eq!(c.night_shift_bonus, 0.0);
    assert_eq!(c.weekend_bonus, 0.0);
}

#[test]
fn custom_multipliers_apply() {
    let options = CostOptions {
        weekend_multiplier: 2.0,
        ..CostOptions::default()
    };
    let s = shift("alice", "2025-03-09", "09:00", "13:00");
    let c = calculate_shift_cost(&s, &employee("alice", 10.0), &options);
    assert!(approx(c.weekend_bonus, 40.0));
    assert!(approx(c.total_cost, 80.0));
}

#[test]
fn schedule_cost_skips_unknown_employees() {
    let employees = vec![employee("alice", 20.0), employee("bob", 10.0)];
    let shifts = vec![
        shift("alice", "2025-03-03", "09:00", "17:00"),
        shift("bob", "2025-03-03", "09:00", "17:00"),
        shift("bob", "2025-03-04", "09:00", "13:00"),
        shift("ghost", "2025-03-04", "09:00", "17:00"),
    ];
    let costs = calculate_schedule_cost(&shifts, &employees, &CostOptions::default());

    assert_eq!(costs.skipped_shifts, 1);
    assert_eq!(costs.shift_costs.len(), 3);
    assert!(approx(costs.total_hours, 20.0));
    assert!(approx(costs.total_cost, 160.0 + 80.0 + 40.0));
    assert!(approx(costs.average_cost_per_hour, 280.0 / 20.0));

    assert_eq!(costs.employee_costs.len(), 2);
    let bob = costs
        .employee_costs
        .iter()
        .find(|e| e.employee_id.as_str() == "bob")
        .unwrap();
    assert_eq!(bob.shift_count, 2);
    assert_eq!(bob.employee_name, "BOB");
    assert!(approx(bob.total_cost, 120.0));
    assert_eq!(costs.shift_costs[0].employee_name, "ALICE");
}

#[test]
fn empty_schedule_has_zero_average() {
    let costs = calculate_schedule_cost(&[], &[employee("alice", 20.0)], &CostOptions::default());
    assert_eq!(costs.total_cost, 0.0);
    assert_eq!(costs.average_cost_per_hour, 0.0);
}

#[test]
fn within_budget_reports_savings() {
    // 5 jours de semaine × 8h × 25 = 1000
    let shifts: Vec<Shift> = (0..5)
        .map(|i| Shift::new(EmployeeId::new("alice"), d("2025-03-03") + Duration::days(i), "09:00", "17:00"))
        .collect();
    let result = optimize_costs(&shifts, &[employee("alice", 25.0)], 1200.0, &CostOptions::default());

    assert!(!result.needs_optimization);
    assert!(approx(result.current_cost, 1000.0));
    assert!(approx(result.savings.unwrap(), 200.0));
    assert!(result.suggestions.is_empty());
}

#[test]
fn over_budget_suggestions_are_ranked() {
    let employees = vec![employee("alice", 30.0), employee("bob", 15.0)];
    let shifts = vec![
        shift("alice", "2025-03-03", "08:00", "18:00"),
        shift("bob", "2025-03-04", "22:00", "06:00"),
    ];
    let result = optimize_costs(&shifts, &employees, 100.0, &CostOptions::default());

    assert!(result.needs_optimization);
    assert!(result.savings.is_none());
    assert!(approx(result.overage, result.current_cost - 100.0));

    let kinds: Vec<_> = result.suggestions.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SuggestionKind::ReduceOvertime,
            SuggestionKind::ReorganizeNightShifts,
            SuggestionKind::BalanceStaffRates,
        ]
    );
    let priorities: Vec<_> = result.suggestions.iter().map(|s| s.priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
    // 2h × 30 × 0.5
    assert!(approx(result.suggestions[0].potential_savings.unwrap(), 30.0));
}

#[test]
fn narrow_rate_spread_gives_no_balancing_suggestion() {
    let employees = vec![employee("alice", 20.0), employee("bob", 24.0)];
    let shifts = vec![shift("alice", "2025-03-03", "09:00", "17:00")];
    let result = optimize_costs(&shifts, &employees, 10.0, &CostOptions::default());
    assert!(result.needs_optimization);
    assert!(result.suggestions.is_empty());
}

#[test]
fn single_day_history_forecasts_nothing() {
    let shifts = vec![shift("alice", "2025-03-03", "09:00", "17:00")];
    let forecast = forecast_costs(&shifts, &[employee("alice", 20.0)], 30);
    assert_eq!(forecast.confidence, Confidence::Low);
    assert_eq!(forecast.forecasted_cost, 0.0);
    assert_eq!(forecast.daily_average, 0.0);
    assert!(forecast.message.is_some());

    let empty = forecast_costs(&[], &[], 30);
    assert_eq!(empty.confidence, Confidence::Low);
    assert_eq!(empty.historical_days, 0);
}

#[test]
fn forecast_confidence_grows_with_history() {
    let employees = [employee("alice", 20.0)];
    let two_weeks = vec![
        shift("alice", "2025-03-03", "09:00", "17:00"),
        shift("alice", "2025-03-16", "09:00", "17:00"),
    ];
    let forecast = forecast_costs(&two_weeks, &employees, 30);
    assert_eq!(forecast.historical_days, 14);
    assert_eq!(forecast.confidence, Confidence::Medium);
    // le 16 mars est un dimanche : 160 + 160 × 1.5
    assert!(approx(forecast.historical_cost, 400.0));
    assert!(approx(forecast.daily_average, 400.0 / 14.0));
    assert!(approx(forecast.forecasted_cost, 400.0 / 14.0 * 30.0));

    let month = vec![
        shift("alice", "2025-03-03", "09:00", "17:00"),
        shift("alice", "2025-04-01", "09:00", "17:00"),
    ];
    assert_eq!(forecast_costs(&month, &employees, 7).confidence, Confidence::High);

    let week = vec![
        shift("alice", "2025-03-03", "09:00", "17:00"),
        shift("alice", "2025-03-05", "09:00", "17:00"),
    ];
    assert_eq!(forecast_costs(&week, &employees, 7).confidence, Confidence::Low);
}
