use std::collections::BTreeMap;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use slotbook_core::models::doctor::{DoctorSummary, Specialty};
use uuid::Uuid;

use crate::test_utils::TestContext;

fn names(doctors: &[DoctorSummary]) -> Vec<&str> {
    doctors.iter().map(|d| d.name.as_str()).collect()
}

#[tokio::test]
async fn test_list_doctors_by_specialty_and_query() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/doctors")
        .add_query_param("specialty", "cardiology")
        .add_query_param("q", "kumar")
        .await;

    response.assert_status_ok();
    let doctors: Vec<DoctorSummary> = response.json();
    assert_eq!(names(&doctors), vec!["Dr. Kumar Singh"]);
    assert_eq!(doctors[0].specialty, Specialty::Cardiology);
    assert_eq!(doctors[0].specialty_label, "Cardiologist");
}

#[tokio::test]
async fn test_title_prefix_is_ignored_in_query() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/doctors")
        .add_query_param("specialty", "cardiology")
        .add_query_param("q", "dr")
        .await;

    // Only names containing "dr" after the title is stripped.
    let doctors: Vec<DoctorSummary> = response.json();
    assert!(doctors.is_empty());
}

#[tokio::test]
async fn test_list_doctors_without_specialty_is_empty() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/doctors").add_query_param("q", "a").await;

    response.assert_status_ok();
    let doctors: Vec<DoctorSummary> = response.json();
    assert!(doctors.is_empty());
}

#[tokio::test]
async fn test_unknown_specialty_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/doctors")
        .add_query_param("specialty", "astrology")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grouped_doctors_by_initial() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/doctors/grouped")
        .add_query_param("specialty", "cardiology")
        .await;

    response.assert_status_ok();
    let grouped: BTreeMap<String, Vec<DoctorSummary>> = response.json();
    assert_eq!(
        grouped.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["A", "K", "Z"]
    );
    assert_eq!(names(&grouped["Z"]), vec!["Doctor Zoya Khan"]);
}

#[tokio::test]
async fn test_get_doctor() {
    let ctx = TestContext::new();

    let response = ctx.server.get(&format!("/api/doctors/{}", ctx.anita.id)).await;

    response.assert_status_ok();
    let doctor: DoctorSummary = response.json();
    assert_eq!(doctor.id, ctx.anita.id);
    assert_eq!(doctor.specialty, Specialty::Dermatology);
}

#[tokio::test]
async fn test_get_unknown_doctor_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx.server.get(&format!("/api/doctors/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: serde_json::Value = ctx.server.get("/health").await.json();
    assert_eq!(health["status"], "ok");

    ctx.server.get("/version").await.assert_status_ok();
}
