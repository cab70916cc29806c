//! # Booking Coordinator
//!
//! Commits a chosen slot as an [`Appointment`] at most once per slot.
//!
//! ## States
//!
//! A booking attempt is an explicit [`BookingState`] advanced one transition
//! at a time:
//!
//! 1. `Selecting`: the patient identity is checked before anything touches the
//!    store, and the slot is checked against what the generator produces for
//!    the doctor and day. The client's `is_available` flag is ignored.
//! 2. `Reserving`: the slot key is claimed through the store's atomic
//!    [`AvailabilityStore::reserve`]. Losing the race ends in `SlotTaken`.
//! 3. `Persisting`: the appointment record is written. If that fails the
//!    reservation is released before failing with `PersistFailed`, so a
//!    failed attempt leaves availability unchanged.
//! 4. `Committed`: the slot stays claimed by the new appointment.
//!
//! Once committed, a [`CalendarEvent`] is published. A calendar failure is
//! reported alongside the appointment and never undoes the booking.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    config::SchedulingConfig,
    errors::{BookingError, ScheduleError, ScheduleResult},
    models::{
        appointment::Appointment, calendar_event::CalendarEvent, doctor::Doctor,
        time_slot::TimeSlot,
    },
    slots::{SlotGenerator, overlay},
    store::{AppointmentStore, AvailabilityStore, CalendarSink, Reservation},
};

#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Identity supplied by the authentication collaborator, if any.
    pub patient_id: Option<String>,
    pub doctor: Doctor,
    pub slot: TimeSlot,
    pub day: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub enum BookingState {
    Selecting(BookingRequest),
    Reserving {
        patient_id: String,
        request: BookingRequest,
    },
    Persisting {
        appointment: Appointment,
        event: CalendarEvent,
    },
    Committed {
        appointment: Appointment,
        event: CalendarEvent,
    },
    Failed(BookingError),
}

impl BookingState {
    pub fn name(&self) -> &'static str {
        match self {
            BookingState::Selecting(_) => "selecting",
            BookingState::Reserving { .. } => "reserving",
            BookingState::Persisting { .. } => "persisting",
            BookingState::Committed { .. } => "committed",
            BookingState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingState::Committed { .. } | BookingState::Failed(_))
    }
}

/// Result of a committed booking.
#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub appointment: Appointment,
    /// `CalendarSyncFailed` when the calendar entry could not be created.
    pub calendar_warning: Option<BookingError>,
}

#[derive(Clone)]
pub struct BookingCoordinator {
    generator: SlotGenerator,
    premium_surcharge_percent: u32,
    availability: Arc<dyn AvailabilityStore>,
    appointments: Arc<dyn AppointmentStore>,
    calendar: Arc<dyn CalendarSink>,
}

impl BookingCoordinator {
    pub fn new(
        config: &SchedulingConfig,
        availability: Arc<dyn AvailabilityStore>,
        appointments: Arc<dyn AppointmentStore>,
        calendar: Arc<dyn CalendarSink>,
    ) -> Self {
        Self {
            generator: SlotGenerator::new(config.premium_policy),
            premium_surcharge_percent: config.premium_surcharge_percent,
            availability,
            appointments,
            calendar,
        }
    }

    pub fn generator(&self) -> &SlotGenerator {
        &self.generator
    }

    pub fn premium_surcharge_percent(&self) -> u32 {
        self.premium_surcharge_percent
    }

    /// Generated slots of `doctor` on `day` with the store's booked state applied.
    pub async fn slots_for_day(&self, doctor: &Doctor, day: NaiveDate) -> ScheduleResult<Vec<TimeSlot>> {
        let slots = self.generator.generate(doctor, day);
        if slots.is_empty() {
            return Ok(slots);
        }

        let booked = self
            .availability
            .fetch_booked_slots(doctor.id, day)
            .await
            .map_err(ScheduleError::Database)?;

        Ok(overlay(slots, &booked))
    }

    /// The slot of `doctor` on `day` starting at `start`, if one is offered.
    pub fn slot_at(&self, doctor: &Doctor, day: NaiveDate, start: DateTime<Utc>) -> Option<TimeSlot> {
        self.generator.slot_at(doctor, day, start)
    }

    /// Runs a booking attempt to a terminal state.
    pub async fn book(&self, request: BookingRequest) -> Result<BookingReceipt, BookingError> {
        let slot_id = request.slot.id;
        let mut state = BookingState::Selecting(request);

        loop {
            state = match state {
                BookingState::Committed { appointment, event } => {
                    info!(
                        appointment_id = %appointment.id,
                        slot = %slot_id,
                        "appointment committed"
                    );
                    let calendar_warning = self.sync_calendar(&event).await.err();
                    return Ok(BookingReceipt {
                        appointment,
                        calendar_warning,
                    });
                }
                BookingState::Failed(err) => {
                    debug!(slot = %slot_id, kind = err.kind(), "booking attempt failed");
                    return Err(err);
                }
                pending => {
                    let from = pending.name();
                    let next = self.advance(pending).await;
                    debug!(slot = %slot_id, from, to = next.name(), "booking transition");
                    next
                }
            };
        }
    }

    /// Performs a single transition. Terminal states are returned unchanged.
    pub async fn advance(&self, state: BookingState) -> BookingState {
        match state {
            BookingState::Selecting(request) => self.select(request),
            BookingState::Reserving {
                patient_id,
                request,
            } => self.reserve(patient_id, request).await,
            BookingState::Persisting { appointment, event } => {
                self.persist(appointment, event).await
            }
            terminal @ (BookingState::Committed { .. } | BookingState::Failed(_)) => terminal,
        }
    }

    fn select(&self, mut request: BookingRequest) -> BookingState {
        let patient_id = match request.patient_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return BookingState::Failed(BookingError::AuthMissing),
        };

        if request.slot.id.doctor_id != request.doctor.id {
            return BookingState::Failed(BookingError::InvalidSlot(format!(
                "slot {} does not belong to doctor {}",
                request.slot.id, request.doctor.id
            )));
        }

        // The generated slot is authoritative for bounds and tier.
        match self
            .generator
            .slot_at(&request.doctor, request.day, request.slot.start)
        {
            Some(generated) if generated.id == request.slot.id && generated.end == request.slot.end => {
                request.slot = generated;
            }
            _ => {
                return BookingState::Failed(BookingError::InvalidSlot(format!(
                    "no slot starting at {} on {}",
                    request.slot.start.to_rfc3339(),
                    request.day
                )));
            }
        }

        BookingState::Reserving {
            patient_id,
            request,
        }
    }

    async fn reserve(&self, patient_id: String, request: BookingRequest) -> BookingState {
        let slot = &request.slot;
        match self.availability.reserve(&slot.id).await {
            Ok(Reservation::Reserved) => {
                let appointment = Appointment {
                    id: Uuid::new_v4(),
                    patient_id,
                    doctor_id: request.doctor.id,
                    date: request.day,
                    slot_id: slot.id,
                    slot_start: slot.start,
                    slot_end: slot.end,
                    description: request
                        .description
                        .clone()
                        .filter(|description| !description.trim().is_empty()),
                    prescription: None,
                    completed: false,
                    fee: request
                        .doctor
                        .fee_for(slot.is_premium, self.premium_surcharge_percent),
                    created_at: Utc::now(),
                };
                let event = CalendarEvent::for_appointment(&appointment, &request.doctor);
                BookingState::Persisting { appointment, event }
            }
            Ok(Reservation::AlreadyTaken) => {
                warn!(slot = %slot.id, "slot already reserved by another booking");
                BookingState::Failed(BookingError::SlotTaken)
            }
            Err(err) => {
                error!(slot = %slot.id, error = %err, "reservation request failed");
                BookingState::Failed(BookingError::StoreUnavailable(err.to_string()))
            }
        }
    }

    async fn persist(&self, appointment: Appointment, event: CalendarEvent) -> BookingState {
        match self.appointments.insert_appointment(&appointment).await {
            Ok(()) => BookingState::Committed { appointment, event },
            Err(err) => {
                warn!(
                    slot = %appointment.slot_id,
                    error = %err,
                    "saving appointment failed, releasing slot"
                );
                if let Err(release_err) = self.availability.release(&appointment.slot_id).await {
                    error!(
                        slot = %appointment.slot_id,
                        error = %release_err,
                        "slot release failed, slot stays reserved"
                    );
                }
                BookingState::Failed(BookingError::PersistFailed(err.to_string()))
            }
        }
    }

    async fn sync_calendar(&self, event: &CalendarEvent) -> Result<(), BookingError> {
        self.calendar.publish(event).await.map_err(|err| {
            warn!(title = %event.title, error = %err, "calendar sync failed, booking kept");
            BookingError::CalendarSyncFailed(err.to_string())
        })
    }

    pub async fn patient_appointments(&self, patient_id: Option<&str>) -> ScheduleResult<Vec<Appointment>> {
        let patient_id = patient_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ScheduleError::Authentication("no patient identity supplied".to_string()))?;

        self.appointments
            .appointments_for_patient(patient_id)
            .await
            .map_err(ScheduleError::Database)
    }

    /// Marks an appointment completed. Completed appointments are final.
    pub async fn complete_appointment(
        &self,
        id: Uuid,
        prescription: Option<String>,
    ) -> ScheduleResult<Appointment> {
        let existing = self
            .appointments
            .get_appointment(id)
            .await
            .map_err(ScheduleError::Database)?
            .ok_or_else(|| ScheduleError::NotFound(format!("Appointment with ID {} not found", id)))?;

        if existing.completed {
            return Err(ScheduleError::Validation(format!(
                "Appointment {} is already completed",
                id
            )));
        }

        let completed = self
            .appointments
            .mark_completed(id, prescription)
            .await
            .map_err(ScheduleError::Database)?
            .ok_or_else(|| {
                ScheduleError::Validation(format!("Appointment {} is already completed", id))
            })?;

        info!(appointment_id = %id, "appointment completed");
        Ok(completed)
    }
}
