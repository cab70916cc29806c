use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_slot::SlotKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub slot_id: SlotKey,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub description: Option<String>,
    pub prescription: Option<String>,
    pub completed: bool,
    pub fee: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub slot_start: DateTime<Utc>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentResponse {
    pub appointment: Appointment,
    /// Set when the booking stands but the calendar entry could not be created.
    pub calendar_warning: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteAppointmentRequest {
    pub prescription: Option<String>,
}
