use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Booking failed: {0}")]
    Booking(#[from] BookingError),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Failure classifications of a single booking attempt.
///
/// Every variant is surfaced to the caller; nothing is retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("no patient identity supplied")]
    AuthMissing,

    #[error("invalid slot: {0}")]
    InvalidSlot(String),

    #[error("slot already taken")]
    SlotTaken,

    #[error("appointment could not be saved: {0}")]
    PersistFailed(String),

    #[error("availability store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("calendar sync failed: {0}")]
    CalendarSyncFailed(String),
}

impl BookingError {
    /// Stable machine-readable code for clients.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::AuthMissing => "auth_missing",
            BookingError::InvalidSlot(_) => "invalid_slot",
            BookingError::SlotTaken => "slot_taken",
            BookingError::PersistFailed(_) => "persist_error",
            BookingError::StoreUnavailable(_) => "store_unavailable",
            BookingError::CalendarSyncFailed(_) => "calendar_sync_failed",
        }
    }

    /// Message shown to the patient.
    pub fn user_message(&self) -> &'static str {
        match self {
            BookingError::AuthMissing => "Please sign in before booking an appointment.",
            BookingError::InvalidSlot(_) => "The selected time is not offered by this doctor.",
            BookingError::SlotTaken => {
                "This time slot was just booked by someone else. Please pick another slot."
            }
            BookingError::PersistFailed(_) => {
                "We could not save your appointment. The slot has been released, please try again."
            }
            BookingError::StoreUnavailable(_) => {
                "Booking is temporarily unavailable. Please try again."
            }
            BookingError::CalendarSyncFailed(_) => {
                "Your appointment is booked but could not be added to your calendar."
            }
        }
    }

    /// The same request may succeed if repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::PersistFailed(_) | BookingError::StoreUnavailable(_)
        )
    }

    /// The displayed slot list is stale and must be re-fetched.
    pub fn requires_refresh(&self) -> bool {
        matches!(self, BookingError::SlotTaken)
    }
}
