use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use slotbook_core::{
    errors::ScheduleError,
    models::doctor::{Doctor, DoctorSummary, Specialty},
    search,
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Default, Deserialize)]
pub struct DoctorQuery {
    pub specialty: Option<String>,
    pub q: Option<String>,
}

impl DoctorQuery {
    fn specialty(&self) -> Result<Option<Specialty>, ScheduleError> {
        self.specialty
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.trim().parse::<Specialty>().map_err(ScheduleError::Validation))
            .transpose()
    }
}

async fn search_doctors(state: &ApiState, query: &DoctorQuery) -> Result<Vec<Doctor>, AppError> {
    let specialty = query.specialty()?;
    let doctors = state.doctors.list_doctors().await?;
    Ok(search::filter(&doctors, specialty, query.q.as_deref()))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DoctorQuery>,
) -> Result<Json<Vec<DoctorSummary>>, AppError> {
    let today = Utc::now().date_naive();
    let doctors = search_doctors(&state, &query).await?;

    Ok(Json(
        doctors
            .iter()
            .map(|doctor| DoctorSummary::from_doctor(doctor, today))
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn grouped_doctors(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DoctorQuery>,
) -> Result<Json<BTreeMap<String, Vec<DoctorSummary>>>, AppError> {
    let today = Utc::now().date_naive();
    let doctors = search_doctors(&state, &query).await?;

    let grouped = search::group_by_initial(doctors)
        .into_iter()
        .map(|(initial, doctors)| {
            let summaries = doctors
                .iter()
                .map(|doctor| DoctorSummary::from_doctor(doctor, today))
                .collect();
            (initial.to_string(), summaries)
        })
        .collect();

    Ok(Json(grouped))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DoctorSummary>, AppError> {
    let doctor = state.find_doctor(id).await?;
    Ok(Json(DoctorSummary::from_doctor(&doctor, Utc::now().date_naive())))
}
