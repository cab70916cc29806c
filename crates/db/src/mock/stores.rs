use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use slotbook_core::{
    models::{
        appointment::Appointment, calendar_event::CalendarEvent, doctor::Doctor,
        time_slot::SlotKey,
    },
    store::{AppointmentStore, AvailabilityStore, CalendarSink, DoctorDirectory, Reservation},
};
use uuid::Uuid;

mock! {
    pub Availability {}

    #[async_trait]
    impl AvailabilityStore for Availability {
        async fn fetch_booked_slots(
            &self,
            doctor_id: Uuid,
            day: NaiveDate,
        ) -> eyre::Result<HashSet<SlotKey>>;

        async fn reserve(&self, slot: &SlotKey) -> eyre::Result<Reservation>;

        async fn release(&self, slot: &SlotKey) -> eyre::Result<()>;
    }
}

mock! {
    pub Appointments {}

    #[async_trait]
    impl AppointmentStore for Appointments {
        async fn insert_appointment(&self, appointment: &Appointment) -> eyre::Result<()>;

        async fn get_appointment(&self, id: Uuid) -> eyre::Result<Option<Appointment>>;

        async fn appointments_for_patient(
            &self,
            patient_id: &str,
        ) -> eyre::Result<Vec<Appointment>>;

        async fn mark_completed(
            &self,
            id: Uuid,
            prescription: Option<String>,
        ) -> eyre::Result<Option<Appointment>>;
    }
}

mock! {
    pub Doctors {}

    #[async_trait]
    impl DoctorDirectory for Doctors {
        async fn list_doctors(&self) -> eyre::Result<Vec<Doctor>>;

        async fn get_doctor(&self, id: Uuid) -> eyre::Result<Option<Doctor>>;
    }
}

mock! {
    pub Calendar {}

    #[async_trait]
    impl CalendarSink for Calendar {
        async fn publish(&self, event: &CalendarEvent) -> eyre::Result<()>;
    }
}
