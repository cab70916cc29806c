use axum::{
    body::to_bytes,
    http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use slotbook_api::middleware::{
    auth::{PATIENT_ID_HEADER, identity_from_parts},
    error_handling::map_error,
};
use slotbook_core::errors::{BookingError, ScheduleError};

#[rstest]
#[case::not_found(ScheduleError::NotFound("Doctor".into()), StatusCode::NOT_FOUND)]
#[case::validation(ScheduleError::Validation("bad date".into()), StatusCode::BAD_REQUEST)]
#[case::authentication(ScheduleError::Authentication("no identity".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(ScheduleError::Authorization("not yours".into()), StatusCode::FORBIDDEN)]
#[case::database(ScheduleError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::auth_missing(BookingError::AuthMissing.into(), StatusCode::UNAUTHORIZED)]
#[case::invalid_slot(BookingError::InvalidSlot("09:10".into()).into(), StatusCode::BAD_REQUEST)]
#[case::slot_taken(BookingError::SlotTaken.into(), StatusCode::CONFLICT)]
#[case::persist(BookingError::PersistFailed("disk full".into()).into(), StatusCode::SERVICE_UNAVAILABLE)]
#[case::store(BookingError::StoreUnavailable("timeout".into()).into(), StatusCode::SERVICE_UNAVAILABLE)]
fn test_error_status_mapping(#[case] error: ScheduleError, #[case] status: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), status);
}

#[tokio::test]
async fn test_booking_error_body() {
    let response = map_error(BookingError::StoreUnavailable("timeout".into()).into());

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["kind"], "store_unavailable");
    assert_eq!(body["retryable"], true);
    assert_eq!(body["refresh_slots"], false);
    assert_eq!(
        body["error"],
        BookingError::StoreUnavailable(String::new()).user_message()
    );
}

#[tokio::test]
async fn test_plain_error_body_has_only_message() {
    let response = map_error(ScheduleError::NotFound("Doctor with ID 7 not found".into()));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        serde_json::json!({ "error": "Resource not found: Doctor with ID 7 not found" })
    );
}

#[rstest]
#[case(Some("patient-9"), Some("patient-9"))]
#[case(Some("  patient-9  "), Some("patient-9"))]
#[case(Some(""), None)]
#[case(None, None)]
fn test_identity_from_header(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
    let mut builder = Request::builder().uri("/api/appointments");
    if let Some(value) = header {
        builder = builder.header(PATIENT_ID_HEADER, value);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();

    assert_eq!(identity_from_parts(&parts).as_deref(), expected);
}
