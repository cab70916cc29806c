use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{appointment::Appointment, doctor::Doctor};

/// Entry handed to the patient's personal calendar after a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub notes: String,
}

impl CalendarEvent {
    pub fn for_appointment(appointment: &Appointment, doctor: &Doctor) -> Self {
        Self {
            title: format!("Appointment with {}", doctor.name),
            start: appointment.slot_start,
            end: appointment.slot_end,
            notes: appointment.description.clone().unwrap_or_default(),
        }
    }
}
