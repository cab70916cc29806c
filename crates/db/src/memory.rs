//! In-process store used by tests and local runs without a database.
//!
//! Each operation takes a single lock for its whole read-modify-write, which
//! gives `reserve` the same atomic claim semantics as the conditional insert
//! of the PostgreSQL store.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Result, eyre};
use slotbook_core::{
    models::{appointment::Appointment, doctor::Doctor, time_slot::SlotKey},
    store::{AppointmentStore, AvailabilityStore, DoctorDirectory, Reservation},
};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    doctors: Mutex<Vec<Doctor>>,
    reservations: Mutex<HashSet<SlotKey>>,
    appointments: Mutex<HashMap<Uuid, Appointment>>,
    reject_appointment_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doctors(doctors: Vec<Doctor>) -> Self {
        Self {
            doctors: Mutex::new(doctors),
            ..Self::default()
        }
    }

    /// Makes every following appointment insert fail, to exercise rollback.
    pub fn reject_appointment_writes(&self, reject: bool) {
        self.reject_appointment_writes.store(reject, Ordering::SeqCst);
    }

    pub fn reserved_slots(&self) -> Result<HashSet<SlotKey>> {
        Ok(self.reservations.lock().map_err(|_| poisoned())?.clone())
    }

    pub fn appointment_count(&self) -> Result<usize> {
        Ok(self.appointments.lock().map_err(|_| poisoned())?.len())
    }
}

fn poisoned() -> eyre::Report {
    eyre!("in-memory store lock poisoned")
}

#[async_trait]
impl AvailabilityStore for InMemoryStore {
    async fn fetch_booked_slots(&self, doctor_id: Uuid, day: NaiveDate) -> Result<HashSet<SlotKey>> {
        let reservations = self.reservations.lock().map_err(|_| poisoned())?;
        Ok(reservations
            .iter()
            .filter(|key| key.doctor_id == doctor_id && key.start.date_naive() == day)
            .copied()
            .collect())
    }

    async fn reserve(&self, slot: &SlotKey) -> Result<Reservation> {
        let mut reservations = self.reservations.lock().map_err(|_| poisoned())?;
        Ok(if reservations.insert(*slot) {
            Reservation::Reserved
        } else {
            Reservation::AlreadyTaken
        })
    }

    async fn release(&self, slot: &SlotKey) -> Result<()> {
        self.reservations
            .lock()
            .map_err(|_| poisoned())?
            .remove(slot);
        Ok(())
    }
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
        if self.reject_appointment_writes.load(Ordering::SeqCst) {
            return Err(eyre!("appointment write rejected"));
        }

        let mut appointments = self.appointments.lock().map_err(|_| poisoned())?;
        if appointments
            .values()
            .any(|existing| existing.slot_id == appointment.slot_id)
        {
            return Err(eyre!("slot {} already has an appointment", appointment.slot_id));
        }
        appointments.insert(appointment.id, appointment.clone());
        Ok(())
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .map_err(|_| poisoned())?
            .get(&id)
            .cloned())
    }

    async fn appointments_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .filter(|appointment| appointment.patient_id == patient_id)
            .cloned()
            .collect();
        found.sort_by_key(|appointment| appointment.slot_start);
        Ok(found)
    }

    async fn mark_completed(&self, id: Uuid, prescription: Option<String>) -> Result<Option<Appointment>> {
        let mut appointments = self.appointments.lock().map_err(|_| poisoned())?;
        Ok(appointments
            .get_mut(&id)
            .filter(|appointment| !appointment.completed)
            .map(|appointment| {
                appointment.completed = true;
                if prescription.is_some() {
                    appointment.prescription = prescription;
                }
                appointment.clone()
            }))
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let mut doctors = self.doctors.lock().map_err(|_| poisoned())?.clone();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(doctors)
    }

    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>> {
        Ok(self
            .doctors
            .lock()
            .map_err(|_| poisoned())?
            .iter()
            .find(|doctor| doctor.id == id)
            .cloned())
    }
}
