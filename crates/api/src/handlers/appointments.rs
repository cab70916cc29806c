use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use slotbook_core::{
    booking::BookingRequest,
    errors::BookingError,
    models::appointment::{
        Appointment, BookAppointmentRequest, BookAppointmentResponse, CompleteAppointmentRequest,
    },
};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::PatientIdentity, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    identity: PatientIdentity,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<BookAppointmentResponse>), AppError> {
    if !identity.is_present() {
        return Err(BookingError::AuthMissing.into());
    }

    let doctor = state.find_doctor(payload.doctor_id).await?;

    let slot = state
        .coordinator
        .slot_at(&doctor, payload.date, payload.slot_start)
        .ok_or_else(|| {
            BookingError::InvalidSlot(format!(
                "no slot starting at {} on {}",
                payload.slot_start.to_rfc3339(),
                payload.date
            ))
        })?;

    let receipt = state
        .coordinator
        .book(BookingRequest {
            patient_id: identity.0,
            doctor,
            slot,
            day: payload.date,
            description: payload.description,
        })
        .await?;

    let response = BookAppointmentResponse {
        appointment: receipt.appointment,
        calendar_warning: receipt
            .calendar_warning
            .map(|warning| warning.user_message().to_string()),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    identity: PatientIdentity,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = state
        .coordinator
        .patient_appointments(identity.as_deref())
        .await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    payload: Option<Json<CompleteAppointmentRequest>>,
) -> Result<Json<Appointment>, AppError> {
    let payload = payload.map(|Json(payload)| payload).unwrap_or_default();
    let appointment = state
        .coordinator
        .complete_appointment(id, payload.prescription)
        .await?;

    Ok(Json(appointment))
}
