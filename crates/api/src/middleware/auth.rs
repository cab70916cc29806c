//! # Patient Identity
//!
//! Authentication itself lives outside this service. The gateway in front of
//! it forwards the authenticated patient as the `x-patient-id` header, which
//! the [`PatientIdentity`] extractor reads.
//!
//! The extractor never rejects a request. A missing identity is passed on as
//! `None` so the booking coordinator can fail with `AuthMissing` before it
//! touches the availability store.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

pub const PATIENT_ID_HEADER: &str = "x-patient-id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientIdentity(pub Option<String>);

impl PatientIdentity {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

/// Trimmed header value; blank or non-UTF-8 values count as absent.
pub fn identity_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(PATIENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for PatientIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PatientIdentity(identity_from_parts(parts)))
    }
}
