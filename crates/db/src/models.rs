use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    appointment::Appointment,
    doctor::{Doctor, Specialty, WorkingHours},
    time_slot::SlotKey,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    /// Days from Monday (0) to Sunday (6).
    pub working_days: Vec<i16>,
    pub consultation_minutes: i64,
    pub fee: f64,
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotReservation {
    pub doctor_id: Uuid,
    pub slot_start: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub patient_id: String,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub description: Option<String>,
    pub prescription: Option<String>,
    pub completed: bool,
    pub fee: f64,
    pub created_at: DateTime<Utc>,
}

pub fn weekday_index(day: Weekday) -> i16 {
    day.num_days_from_monday() as i16
}

pub fn weekday_from_index(index: i16) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

impl TryFrom<DbDoctor> for Doctor {
    type Error = eyre::Report;

    fn try_from(row: DbDoctor) -> Result<Self> {
        let specialty = row
            .specialty
            .parse::<Specialty>()
            .map_err(|e| eyre!("Doctor {} has {}", row.id, e))?;

        let days = row
            .working_days
            .iter()
            .map(|&index| {
                weekday_from_index(index)
                    .ok_or_else(|| eyre!("Doctor {} has invalid working day {}", row.id, index))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Doctor {
            id: row.id,
            name: row.name,
            specialty,
            working_hours: WorkingHours {
                start: row.work_start,
                end: row.work_end,
                days,
            },
            consultation_minutes: row.consultation_minutes,
            fee: row.fee,
            date_of_birth: row.date_of_birth,
        })
    }
}

impl From<DbSlotReservation> for SlotKey {
    fn from(row: DbSlotReservation) -> Self {
        SlotKey::new(row.doctor_id, row.slot_start)
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            date: row.appointment_date,
            slot_id: SlotKey::new(row.doctor_id, row.slot_start),
            slot_start: row.slot_start,
            slot_end: row.slot_end,
            description: row.description,
            prescription: row.prescription,
            completed: row.completed,
            fee: row.fee,
            created_at: row.created_at,
        }
    }
}
