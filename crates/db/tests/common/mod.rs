use chrono::{NaiveDate, NaiveTime};
use slotbook_core::models::doctor::{Doctor, Specialty, WorkingHours};
use uuid::Uuid;

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn doctor(name: &str) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        name: name.to_string(),
        specialty: Specialty::Dermatology,
        working_hours: WorkingHours::daily(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        ),
        consultation_minutes: 30,
        fee: 300.0,
        date_of_birth: NaiveDate::from_ymd_opt(1975, 2, 3).unwrap(),
    }
}
