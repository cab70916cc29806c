use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use slotbook_core::models::time_slot::{DaySlotsResponse, SlotTier};

use crate::test_utils::{TestContext, at, day, patient};

#[tokio::test]
async fn test_day_slots_tile_working_hours() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/doctors/{}/slots", ctx.kumar.id))
        .add_query_param("date", day())
        .await;

    response.assert_status_ok();
    let body: DaySlotsResponse = response.json();
    let starts: Vec<_> = body.slots.iter().map(|slot| slot.start).collect();
    assert_eq!(starts, vec![at(9, 0), at(9, 30), at(10, 0), at(10, 30)]);
    assert!(body.slots.iter().all(|slot| slot.is_available));

    let tiers: Vec<_> = body.slots.iter().map(|slot| slot.tier).collect();
    assert_eq!(
        tiers,
        vec![SlotTier::Standard, SlotTier::Standard, SlotTier::Standard, SlotTier::Premium]
    );
    assert_eq!(body.slots[0].fee, 400.0);
    assert_eq!(body.slots[3].fee, 600.0);
}

#[tokio::test]
async fn test_tier_filter() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/doctors/{}/slots", ctx.kumar.id))
        .add_query_param("date", day())
        .add_query_param("tier", "premium")
        .await;

    let body: DaySlotsResponse = response.json();
    assert_eq!(body.slots.len(), 1);
    assert_eq!(body.slots[0].start, at(10, 30));
}

#[tokio::test]
async fn test_booked_slot_shows_unavailable() {
    let ctx = TestContext::new();
    let (name, value) = patient("patient-1");

    ctx.server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&json!({
            "doctor_id": ctx.kumar.id,
            "date": day(),
            "slot_start": at(9, 30),
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let body: DaySlotsResponse = ctx
        .server
        .get(&format!("/api/doctors/{}/slots", ctx.kumar.id))
        .add_query_param("date", day())
        .await
        .json();

    let available: Vec<bool> = body.slots.iter().map(|slot| slot.is_available).collect();
    assert_eq!(available, vec![true, false, true, true]);
}

#[tokio::test]
async fn test_missing_date_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/doctors/{}/slots", ctx.kumar.id))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
