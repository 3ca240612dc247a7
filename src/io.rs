use crate::model::{Employee, EmployeeId, PreferredShift, Shift, ShiftKind};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Import de salariés depuis CSV, header :
/// `id,name,hourly_rate[,max_hours_per_day][,max_hours_per_week][,skills][,can_work_nights][,can_work_weekends][,preferred_shifts][,scheduling_priority][,is_active]`
///
/// Les listes (`skills`, `preferred_shifts`) sont séparées par `;`. Les colonnes
/// optionnelles vides gardent les valeurs par défaut.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid employee row (empty)");
        }
        let rate: f64 = rec
            .get(2)
            .context("missing hourly_rate")?
            .trim()
            .parse()
            .with_context(|| format!("invalid hourly_rate for employee {id}"))?;
        let mut employee = Employee::new(id, name, rate)?;

        let field = |i: usize| rec.get(i).map(str::trim).filter(|s| !s.is_empty());

        if let Some(v) = field(3) {
            employee.max_hours_per_day = v
                .parse()
                .with_context(|| format!("invalid max_hours_per_day for employee {id}"))?;
        }
        if let Some(v) = field(4) {
            employee.max_hours_per_week = v
                .parse()
                .with_context(|| format!("invalid max_hours_per_week for employee {id}"))?;
        }
        if let Some(v) = field(5) {
            employee.skills = split_list(v).map(str::to_string).collect();
        }
        if let Some(v) = field(6) {
            employee.can_work_nights = parse_bool(v)
                .with_context(|| format!("invalid can_work_nights for employee {id}"))?;
        }
        if let Some(v) = field(7) {
            employee.can_work_weekends = parse_bool(v)
                .with_context(|| format!("invalid can_work_weekends for employee {id}"))?;
        }
        if let Some(v) = field(8) {
            employee.preferred_shifts = parse_preferred_shifts(v)
                .with_context(|| format!("invalid preferred_shifts for employee {id}"))?;
        }
        if let Some(v) = field(9) {
            let priority: u8 = v
                .parse()
                .with_context(|| format!("invalid scheduling_priority for employee {id}"))?;
            employee = employee.with_priority(priority)?;
        }
        if let Some(v) = field(10) {
            employee.is_active = parse_bool(v)
                .with_context(|| format!("invalid is_active for employee {id}"))?;
        }
        out.push(employee);
    }
    Ok(out)
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

fn parse_preferred_shifts(raw: &str) -> anyhow::Result<BTreeSet<PreferredShift>> {
    split_list(raw)
        .map(|chunk| match chunk.to_ascii_lowercase().as_str() {
            "morning" => Ok(PreferredShift::Morning),
            "afternoon" => Ok(PreferredShift::Afternoon),
            "night" => Ok(PreferredShift::Night),
            "full-day" | "fullday" => Ok(PreferredShift::FullDay),
            other => Err(anyhow::anyhow!("unknown preferred shift: {other}")),
        })
        .collect()
}

/// Import de créneaux : header `employee_id,date,start_time,end_time[,is_holiday]`
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let employee = rec.get(0).context("missing employee_id")?.trim();
        let date = rec.get(1).context("missing date")?.trim();
        let start = rec.get(2).context("missing start_time")?.trim();
        let end = rec.get(3).context("missing end_time")?.trim();
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {date}"))?;
        let mut shift = Shift::new(EmployeeId::new(employee), date, start, end);
        if let Some(flag) = rec.get(4).map(str::trim).filter(|s| !s.is_empty()) {
            shift.is_holiday = parse_bool(flag)
                .with_context(|| format!("invalid is_holiday value on {date}"))?;
        }
        out.push(shift);
    }
    Ok(out)
}

/// Export JSON (jolie mise en forme)
pub fn export_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des créneaux travaillés : header `id,employee_id,employee_name,date,start_time,end_time,hours,is_holiday`
pub fn export_shifts_csv<P: AsRef<Path>>(
    path: P,
    shifts: &[Shift],
    employees: &[Employee],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "employee_id",
        "employee_name",
        "date",
        "start_time",
        "end_time",
        "hours",
        "is_holiday",
    ])?;
    for s in shifts.iter().filter(|s| s.kind == ShiftKind::Work) {
        let name = employees
            .iter()
            .find(|e| e.id == s.employee_id)
            .map(|e| e.name.as_str())
            .unwrap_or("");
        let date = s.date.to_string();
        let hours = format!("{:.2}", s.duration_hours());
        w.write_record([
            s.id.as_str(),
            s.employee_id.as_str(),
            name,
            date.as_str(),
            s.start_time.as_str(),
            s.end_time.as_str(),
            hours.as_str(),
            if s.is_holiday { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
