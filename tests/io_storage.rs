#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::model::{Employee, EmployeeId, PreferredShift, Shift, ShiftTemplate, ShiftType};
use roulement::{io, Dataset, JsonStorage, Storage};
use std::fs;
use tempfile::tempdir;

#[test]
fn import_employees_with_optional_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(
        &path,
        "id,name,hourly_rate,max_hours_per_day,max_hours_per_week,skills,can_work_nights,can_work_weekends,preferred_shifts,scheduling_priority,is_active\n\
         e1,Alice,21.5,10,35,caisse;accueil,non,oui,morning;night,8,true\n\
         e2,Bob,18,,,,,,,,\n",
    )
    .unwrap();

    let employees = io::import_employees_csv(&path).unwrap();
    assert_eq!(employees.len(), 2);

    let alice = &employees[0];
    assert_eq!(alice.id.as_str(), "e1");
    assert_eq!(alice.hourly_rate, 21.5);
    assert_eq!(alice.max_hours_per_day, 10.0);
    assert_eq!(alice.max_hours_per_week, 35.0);
    assert!(alice.skills.contains("accueil"));
    assert!(!alice.can_work_nights);
    assert!(alice.preferred_shifts.contains(&PreferredShift::Night));
    assert_eq!(alice.scheduling_priority, 8);

    let bob = &employees[1];
    assert_eq!(bob.max_hours_per_day, 12.0);
    assert_eq!(bob.max_hours_per_week, 60.0);
    assert!(bob.can_work_nights);
    assert!(bob.is_active);
    assert_eq!(bob.scheduling_priority, 5);
}

#[test]
fn import_rejects_out_of_range_priority() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(
        &path,
        "id,name,hourly_rate,max_hours_per_day,max_hours_per_week,skills,can_work_nights,can_work_weekends,preferred_shifts,scheduling_priority\n\
         e1,Alice,20,,,,,,,11\n",
    )
    .unwrap();
    assert!(io::import_employees_csv(&path).is_err());
}

#[test]
fn storage_roundtrip_keeps_dataset() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("dataset.json")).unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let dataset = Dataset {
        employees: vec![Employee::new("e1", "Alice", 20.0).unwrap()],
        templates: vec![ShiftTemplate::new("Nuit", "22:00", "06:00", ShiftType::Night, 2).unwrap()],
        shifts: vec![Shift::new(EmployeeId::new("e1"), date, "22:00", "06:00")],
        ..Dataset::default()
    };
    storage.save(&dataset).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.employees, dataset.employees);
    assert_eq!(loaded.templates, dataset.templates);
    assert_eq!(loaded.shifts, dataset.shifts);
}

#[test]
fn dataset_accepts_collaborator_json() {
    let json = r#"{
        "employees": [{"id": "e1", "name": "Alice", "hourlyRate": 20, "preferredShifts": ["full-day"]}],
        "templates": [{"name": "Matin", "startTime": "06:00", "endTime": "14:00", "shiftType": "morning", "requiredStaff": 2}],
        "availabilities": [{"employeeId": "e1", "startDate": "2025-03-01", "endDate": "2025-03-31", "daysOfWeek": [1, 2], "type": "preferred", "status": "approved"}],
        "leaves": [{"employeeId": "e1", "startDate": "2025-03-10", "endDate": "2025-03-12", "status": "pending"}],
        "shifts": [{"employeeId": "e1", "date": "2025-03-03", "startTime": "06:00", "endTime": "14:00", "type": "shift", "isHoliday": true}]
    }"#;
    let dataset: Dataset = serde_json::from_str(json).unwrap();

    assert_eq!(dataset.employees[0].max_hours_per_week, 60.0);
    assert!(dataset.employees[0].preferred_shifts.contains(&PreferredShift::FullDay));
    assert_eq!(dataset.templates[0].required_staff, 2);
    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let wednesday = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    assert!(dataset.availabilities[0].covers(&EmployeeId::new("e1"), monday));
    assert!(!dataset.availabilities[0].covers(&EmployeeId::new("e1"), wednesday));
    assert!(!dataset.leaves[0].blocks(&EmployeeId::new("e1"), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()));
    assert!(dataset.shifts[0].is_holiday);
    assert!(dataset.shifts[0].is_work());
}

#[test]
fn export_shifts_csv_writes_names_and_hours() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifts.csv");
    let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let employees = vec![Employee::new("e1", "Alice", 20.0).unwrap()];
    let shifts = vec![Shift::new(EmployeeId::new("e1"), date, "22:00", "06:30")];

    io::export_shifts_csv(&path, &shifts, &employees).unwrap();
    let out = fs::read_to_string(&path).unwrap();
    let mut lines = out.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,employee_id,employee_name,date,start_time,end_time,hours,is_holiday"
    );
    let row = lines.next().unwrap();
    assert!(row.ends_with("e1,Alice,2025-03-03,22:00,06:30,8.50,false"));
}
