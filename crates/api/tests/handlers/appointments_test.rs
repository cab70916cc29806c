use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotbook_core::models::appointment::{Appointment, BookAppointmentResponse};
use slotbook_db::mock::MockCalendar;
use uuid::Uuid;

use crate::test_utils::{TestContext, at, day, patient};

fn booking(doctor_id: Uuid, hour: u32, minute: u32) -> Value {
    json!({
        "doctor_id": doctor_id,
        "date": day(),
        "slot_start": at(hour, minute),
        "description": "Chest pain on exertion",
    })
}

#[tokio::test]
async fn test_book_appointment() {
    let ctx = TestContext::new();
    let (name, value) = patient("patient-1");

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.kumar.id, 10, 30))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: BookAppointmentResponse = response.json();
    assert_eq!(body.appointment.patient_id, "patient-1");
    assert_eq!(body.appointment.doctor_id, ctx.kumar.id);
    assert_eq!(body.appointment.slot_start, at(10, 30));
    assert_eq!(body.appointment.slot_end, at(11, 0));
    assert_eq!(body.appointment.fee, 600.0);
    assert!(!body.appointment.completed);
    assert_eq!(body.calendar_warning, None);
    assert_eq!(ctx.store.appointment_count().unwrap(), 1);
}

#[tokio::test]
async fn test_second_booking_of_slot_conflicts() {
    let ctx = TestContext::new();
    let (name, value) = patient("patient-1");
    ctx.server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.kumar.id, 9, 0))
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = patient("patient-2");
    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.kumar.id, 9, 0))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["kind"], "slot_taken");
    assert_eq!(body["refresh_slots"], true);
    assert_eq!(body["retryable"], false);
    assert_eq!(ctx.store.appointment_count().unwrap(), 1);
}

#[tokio::test]
async fn test_booking_without_identity_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&booking(ctx.kumar.id, 9, 0))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "auth_missing");
    assert!(ctx.store.reserved_slots().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_identity_is_unauthorized() {
    let ctx = TestContext::new();
    let (name, value) = patient("   ");

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.kumar.id, 9, 0))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_off_grid_start_is_bad_request() {
    let ctx = TestContext::new();
    let (name, value) = patient("patient-1");

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.kumar.id, 9, 10))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "invalid_slot");
}

#[tokio::test]
async fn test_booking_unknown_doctor_is_not_found() {
    let ctx = TestContext::new();
    let (name, value) = patient("patient-1");

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(Uuid::new_v4(), 9, 0))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_failed_save_is_retryable_and_frees_slot() {
    let ctx = TestContext::new();
    ctx.store.reject_appointment_writes(true);
    let (name, value) = patient("patient-1");

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.kumar.id, 10, 0))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["kind"], "persist_error");
    assert_eq!(body["retryable"], true);
    assert!(ctx.store.reserved_slots().unwrap().is_empty());

    ctx.store.reject_appointment_writes(false);
    let (name, value) = patient("patient-1");
    ctx.server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.kumar.id, 10, 0))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_calendar_failure_keeps_booking() {
    let mut calendar = MockCalendar::new();
    calendar
        .expect_publish()
        .times(1)
        .returning(|_| Err(eyre::eyre!("calendar permission denied")));
    let ctx = TestContext::with_calendar(Arc::new(calendar));
    let (name, value) = patient("patient-1");

    let response = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.anita.id, 9, 30))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: BookAppointmentResponse = response.json();
    assert!(body.calendar_warning.is_some());
    assert_eq!(ctx.store.appointment_count().unwrap(), 1);
}

#[tokio::test]
async fn test_list_appointments_for_patient() {
    let ctx = TestContext::new();
    for (patient_id, hour, minute) in [("patient-1", 10, 0), ("patient-2", 9, 30), ("patient-1", 9, 0)] {
        let (name, value) = patient(patient_id);
        ctx.server
            .post("/api/appointments")
            .add_header(name, value)
            .json(&booking(ctx.kumar.id, hour, minute))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let (name, value) = patient("patient-1");
    let response = ctx.server.get("/api/appointments").add_header(name, value).await;

    response.assert_status_ok();
    let appointments: Vec<Appointment> = response.json();
    let starts: Vec<_> = appointments.iter().map(|a| a.slot_start).collect();
    assert_eq!(starts, vec![at(9, 0), at(10, 0)]);
}

#[tokio::test]
async fn test_list_appointments_requires_identity() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/appointments").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_complete_appointment_once() {
    let ctx = TestContext::new();
    let (name, value) = patient("patient-1");
    let booked: BookAppointmentResponse = ctx
        .server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&booking(ctx.anita.id, 9, 0))
        .await
        .json();
    let path = format!("/api/appointments/{}/complete", booked.appointment.id);

    let response = ctx
        .server
        .post(&path)
        .json(&json!({ "prescription": "Cetirizine 10mg" }))
        .await;

    response.assert_status_ok();
    let completed: Appointment = response.json();
    assert!(completed.completed);
    assert_eq!(completed.prescription.as_deref(), Some("Cetirizine 10mg"));

    let again = ctx.server.post(&path).await;
    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_unknown_appointment_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post(&format!("/api/appointments/{}/complete", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
