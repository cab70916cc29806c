//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies, so every
//! handler reports failures the same way.
//!
//! Booking failures carry extra fields for the client:
//!
//! ```json
//! { "error": "...", "kind": "slot_taken", "retryable": false, "refresh_slots": true }
//! ```

use axum::{
    BoxError, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotbook_core::errors::{BookingError, ScheduleError};

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::ScheduleError;
/// use uuid::Uuid;
///
/// async fn handler(id: Uuid) -> Result<Json<String>, AppError> {
///     Err(AppError(ScheduleError::NotFound(format!("Doctor with ID {} not found", id))))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

pub fn booking_status(err: &BookingError) -> StatusCode {
    match err {
        BookingError::AuthMissing => StatusCode::UNAUTHORIZED,
        BookingError::InvalidSlot(_) => StatusCode::BAD_REQUEST,
        BookingError::SlotTaken => StatusCode::CONFLICT,
        BookingError::PersistFailed(_) | BookingError::StoreUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        BookingError::CalendarSyncFailed(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            ScheduleError::Booking(err) => (
                booking_status(err),
                json!({
                    "error": err.user_message(),
                    "kind": err.kind(),
                    "retryable": err.is_retryable(),
                    "refresh_slots": err.requires_refresh(),
                }),
            ),
            other => {
                let status = match other {
                    ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
                    ScheduleError::Validation(_) => StatusCode::BAD_REQUEST,
                    ScheduleError::Authentication(_) => StatusCode::UNAUTHORIZED,
                    ScheduleError::Authorization(_) => StatusCode::FORBIDDEN,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("Request failed: {}", other);
                }
                (status, json!({ "error": other.to_string() }))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `ScheduleResult` in handlers
impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(ScheduleError::Booking(err))
    }
}

/// Store plumbing errors surface as database failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ScheduleError::Database(err))
    }
}

/// Maps a ScheduleError to an HTTP response
pub fn map_error(err: ScheduleError) -> Response {
    AppError(err).into_response()
}

/// Converts failures of the timeout layer into responses
pub async fn handle_timeout(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "request timed out" })),
        )
            .into_response()
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response()
    }
}
