//! PostgreSQL implementation of the engine's store traits.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use slotbook_core::{
    models::{appointment::Appointment, doctor::Doctor, time_slot::SlotKey},
    store::{AppointmentStore, AvailabilityStore, DoctorDirectory, Reservation},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for PgStore {
    async fn fetch_booked_slots(&self, doctor_id: Uuid, day: NaiveDate) -> Result<HashSet<SlotKey>> {
        let rows = repositories::reservation::get_reserved_slots(&self.pool, doctor_id, day).await?;
        Ok(rows.into_iter().map(SlotKey::from).collect())
    }

    async fn reserve(&self, slot: &SlotKey) -> Result<Reservation> {
        let reserved =
            repositories::reservation::reserve_slot(&self.pool, slot.doctor_id, slot.start).await?;
        Ok(if reserved {
            Reservation::Reserved
        } else {
            Reservation::AlreadyTaken
        })
    }

    async fn release(&self, slot: &SlotKey) -> Result<()> {
        repositories::reservation::release_slot(&self.pool, slot.doctor_id, slot.start).await
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
        repositories::appointment::create_appointment(&self.pool, appointment).await?;
        Ok(())
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
        let row = repositories::appointment::get_appointment_by_id(&self.pool, id).await?;
        Ok(row.map(Appointment::from))
    }

    async fn appointments_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>> {
        let rows =
            repositories::appointment::get_appointments_by_patient_id(&self.pool, patient_id).await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn mark_completed(&self, id: Uuid, prescription: Option<String>) -> Result<Option<Appointment>> {
        let row = repositories::appointment::complete_appointment(
            &self.pool,
            id,
            prescription.as_deref(),
        )
        .await?;
        Ok(row.map(Appointment::from))
    }
}

#[async_trait]
impl DoctorDirectory for PgStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        repositories::doctor::list_doctors(&self.pool)
            .await?
            .into_iter()
            .map(Doctor::try_from)
            .collect()
    }

    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>> {
        repositories::doctor::get_doctor_by_id(&self.pool, id)
            .await?
            .map(Doctor::try_from)
            .transpose()
    }
}
