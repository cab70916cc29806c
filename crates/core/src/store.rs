//! # Store Collaborators
//!
//! Traits for everything the engine consumes from the outside world. The
//! engine never persists anything itself; implementations live in the
//! `slotbook-db` crate (PostgreSQL, in-memory, and mocks) and the API crate
//! (calendar sync).
//!
//! ## Reservation contract
//!
//! [`AvailabilityStore::reserve`] is the only concurrency-critical call in the
//! system. Any number of concurrent calls for one [`SlotKey`] must resolve
//! with exactly one [`Reservation::Reserved`]; every other caller gets
//! [`Reservation::AlreadyTaken`]. Implementations must use a conditional
//! write in the store itself. Reading the booked set and then writing is not
//! an implementation of this contract.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    appointment::Appointment, calendar_event::CalendarEvent, doctor::Doctor, time_slot::SlotKey,
};

/// Outcome of an atomic slot claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reservation {
    Reserved,
    AlreadyTaken,
}

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Keys of the slots of `doctor_id` on `day` that are already claimed.
    async fn fetch_booked_slots(&self, doctor_id: Uuid, day: NaiveDate) -> Result<HashSet<SlotKey>>;

    /// Atomically claims `slot`.
    async fn reserve(&self, slot: &SlotKey) -> Result<Reservation>;

    /// Returns a claimed slot to available. Only used to roll back a
    /// reservation whose appointment could not be saved.
    async fn release(&self, slot: &SlotKey) -> Result<()>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert_appointment(&self, appointment: &Appointment) -> Result<()>;

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>>;

    /// Appointments of a patient ordered by slot start.
    async fn appointments_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>>;

    /// Marks a not-yet-completed appointment as completed.
    ///
    /// Returns `None` when no pending appointment with `id` exists.
    async fn mark_completed(&self, id: Uuid, prescription: Option<String>) -> Result<Option<Appointment>>;
}

/// Read-only doctor roster owned by the backend.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>>;
}

/// Receiver of calendar entries for the patient's personal calendar.
#[async_trait]
pub trait CalendarSink: Send + Sync {
    async fn publish(&self, event: &CalendarEvent) -> Result<()>;
}
