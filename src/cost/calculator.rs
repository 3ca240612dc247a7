use super::types::{CostBreakdown, CostOptions, EmployeeCost, ScheduleCost, ShiftCost};
use crate::compliance::OVERTIME_DAILY_THRESHOLD;
use crate::model::{Employee, EmployeeId, Shift};
use crate::time;
use std::collections::{BTreeMap, HashMap};

/// Chiffre un créneau : coût de base puis majorations cumulables.
pub fn calculate_shift_cost(shift: &Shift, employee: &Employee, options: &CostOptions) -> CostBreakdown {
    let hours = shift.duration_hours();
    let rate = employee.hourly_rate;
    let base_cost = hours * rate;

    let mut breakdown = CostBreakdown {
        base_hours: hours,
        base_rate: rate,
        base_cost,
        ..CostBreakdown::default()
    };

    if hours > OVERTIME_DAILY_THRESHOLD {
        breakdown.overtime_hours = hours - OVERTIME_DAILY_THRESHOLD;
        // la base couvre déjà toutes les heures au taux normal
        breakdown.overtime_cost = breakdown.overtime_hours * rate * (options.overtime_multiplier - 1.0);
    }
    if shift.is_night() {
        breakdown.night_shift_bonus = base_cost * (options.night_shift_multiplier - 1.0);
    }
    if time::is_weekend(shift.date) {
        breakdown.weekend_bonus = base_cost * (options.weekend_multiplier - 1.0);
    }
    if shift.is_holiday {
        breakdown.holiday_bonus = base_cost * (options.holiday_multiplier - 1.0);
    }

    breakdown.total_cost = breakdown.base_cost
        + breakdown.overtime_cost
        + breakdown.night_shift_bonus
        + breakdown.weekend_bonus
        + breakdown.holiday_bonus;
    breakdown
}

/// Agrège le coût d'un planning par créneau et par salarié.
///
/// Un créneau dont le salarié est absent de `employees` est ignoré avec un
/// avertissement : les collections fournies peuvent être incohérentes.
pub fn calculate_schedule_cost(
    shifts: &[Shift],
    employees: &[Employee],
    options: &CostOptions,
) -> ScheduleCost {
    let index: HashMap<&EmployeeId, &Employee> = employees.iter().map(|e| (&e.id, e)).collect();
    let mut per_employee: BTreeMap<&EmployeeId, EmployeeCost> = BTreeMap::new();
    let mut out = ScheduleCost::default();

    for shift in shifts.iter().filter(|s| s.is_work()) {
        let Some(employee) = index.get(&shift.employee_id).copied() else {
            tracing::warn!(
                shift = shift.id.as_str(),
                employee = shift.employee_id.as_str(),
                "shift references an unknown employee, skipped from costing"
            );
            out.skipped_shifts += 1;
            continue;
        };

        let breakdown = calculate_shift_cost(shift, employee, options);
        out.total_cost += breakdown.total_cost;
        out.total_hours += breakdown.base_hours;
        out.total_overtime_hours += breakdown.overtime_hours;

        let rollup = per_employee.entry(&employee.id).or_insert_with(|| EmployeeCost {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            shift_count: 0,
            total_hours: 0.0,
            overtime_hours: 0.0,
            total_cost: 0.0,
        });
        rollup.shift_count += 1;
        rollup.total_hours += breakdown.base_hours;
        rollup.overtime_hours += breakdown.overtime_hours;
        rollup.total_cost += breakdown.total_cost;

        out.shift_costs.push(ShiftCost {
            shift_id: shift.id.clone(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            date: shift.date,
            breakdown,
        });
    }

    out.average_cost_per_hour = if out.total_hours > 0.0 {
        out.total_cost / out.total_hours
    } else {
        0.0
    };
    out.employee_costs = per_employee.into_values().collect();
    out
}
