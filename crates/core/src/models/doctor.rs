use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    GeneralPractice,
    Cardiology,
    Dermatology,
    Dentistry,
    Ophthalmology,
    Orthopaedics,
    Paediatrics,
    Neurology,
    Gynaecology,
    Psychiatry,
    Ent,
}

impl Specialty {
    pub const ALL: [Specialty; 11] = [
        Specialty::GeneralPractice,
        Specialty::Cardiology,
        Specialty::Dermatology,
        Specialty::Dentistry,
        Specialty::Ophthalmology,
        Specialty::Orthopaedics,
        Specialty::Paediatrics,
        Specialty::Neurology,
        Specialty::Gynaecology,
        Specialty::Psychiatry,
        Specialty::Ent,
    ];

    /// Wire and storage code, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::GeneralPractice => "general_practice",
            Specialty::Cardiology => "cardiology",
            Specialty::Dermatology => "dermatology",
            Specialty::Dentistry => "dentistry",
            Specialty::Ophthalmology => "ophthalmology",
            Specialty::Orthopaedics => "orthopaedics",
            Specialty::Paediatrics => "paediatrics",
            Specialty::Neurology => "neurology",
            Specialty::Gynaecology => "gynaecology",
            Specialty::Psychiatry => "psychiatry",
            Specialty::Ent => "ent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Specialty::GeneralPractice => "General Physician",
            Specialty::Cardiology => "Cardiologist",
            Specialty::Dermatology => "Dermatologist",
            Specialty::Dentistry => "Dentist",
            Specialty::Ophthalmology => "Eye Specialist",
            Specialty::Orthopaedics => "Orthopaedic",
            Specialty::Paediatrics => "Paediatrician",
            Specialty::Neurology => "Neurologist",
            Specialty::Gynaecology => "Gynaecologist",
            Specialty::Psychiatry => "Psychiatrist",
            Specialty::Ent => "ENT Specialist",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialty::ALL
            .into_iter()
            .find(|specialty| specialty.as_str() == s)
            .ok_or_else(|| format!("unknown specialty: {}", s))
    }
}

fn every_day() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
}

/// Daily consultation window of a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default = "every_day")]
    pub days: Vec<Weekday>,
}

impl WorkingHours {
    /// Window applied on every day of the week.
    pub fn daily(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            days: every_day(),
        }
    }

    pub fn works_on(&self, day: NaiveDate) -> bool {
        self.days.contains(&day.weekday())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: Specialty,
    pub working_hours: WorkingHours,
    /// Length of one consultation. Non-positive values yield no slots.
    pub consultation_minutes: i64,
    pub fee: f64,
    pub date_of_birth: NaiveDate,
}

impl Doctor {
    /// Age in whole years on the given date.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.date_of_birth).unwrap_or(0)
    }

    /// Price of a consultation, with the surcharge applied to premium slots.
    pub fn fee_for(&self, is_premium: bool, surcharge_percent: u32) -> f64 {
        if is_premium {
            self.fee * (100.0 + f64::from(surcharge_percent)) / 100.0
        } else {
            self.fee
        }
    }
}

/// Doctor as listed in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub specialty: Specialty,
    pub specialty_label: String,
    pub age: u32,
    pub fee: f64,
    pub consultation_minutes: i64,
}

impl DoctorSummary {
    pub fn from_doctor(doctor: &Doctor, today: NaiveDate) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name.clone(),
            specialty: doctor.specialty,
            specialty_label: doctor.specialty.label().to_string(),
            age: doctor.age_on(today),
            fee: doctor.fee,
            consultation_minutes: doctor.consultation_minutes,
        }
    }
}
