use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use slotbook_api::{ApiState, build_router, middleware::auth::PATIENT_ID_HEADER};
use slotbook_core::{
    booking::BookingCoordinator,
    config::SchedulingConfig,
    models::doctor::{Doctor, Specialty, WorkingHours},
    store::CalendarSink,
};
use slotbook_db::{InMemoryStore, mock::MockCalendar};
use uuid::Uuid;

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub server: TestServer,
    pub kumar: Doctor,
    pub anita: Doctor,
}

impl TestContext {
    pub fn new() -> Self {
        let mut calendar = MockCalendar::new();
        calendar.expect_publish().returning(|_| Ok(()));
        Self::with_calendar(Arc::new(calendar))
    }

    pub fn with_calendar(calendar: Arc<dyn CalendarSink>) -> Self {
        let kumar = doctor("Dr. Kumar Singh", Specialty::Cardiology);
        let anita = doctor("Dr. Anita Rao", Specialty::Dermatology);
        let roster = vec![
            kumar.clone(),
            anita.clone(),
            doctor("Dr. Arjun Mehta", Specialty::Cardiology),
            doctor("Doctor Zoya Khan", Specialty::Cardiology),
        ];

        let config = SchedulingConfig::default();
        let store = Arc::new(InMemoryStore::with_doctors(roster));
        let coordinator =
            BookingCoordinator::new(&config, store.clone(), store.clone(), calendar);
        let state = Arc::new(ApiState::new(&config, coordinator, store.clone()));
        let server = TestServer::new(build_router(state)).unwrap();

        Self {
            store,
            server,
            kumar,
            anita,
        }
    }
}

pub fn doctor(name: &str, specialty: Specialty) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        name: name.to_string(),
        specialty,
        working_hours: WorkingHours::daily(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        ),
        consultation_minutes: 30,
        fee: 400.0,
        date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
    }
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    day().and_hms_opt(hour, minute, 0).unwrap().and_utc()
}

pub fn patient(id: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(PATIENT_ID_HEADER),
        HeaderValue::from_str(id).unwrap(),
    )
}
