use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use slotbook_core::{
    models::time_slot::{DaySlotsResponse, SlotTier, TimeSlotResponse},
    slots::in_tier,
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
    pub tier: Option<SlotTier>,
}

/// Slots of one doctor on one day with the current booked state applied.
#[axum::debug_handler]
pub async fn get_day_slots(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<DaySlotsResponse>, AppError> {
    let doctor = state.find_doctor(id).await?;

    let mut slots = state.coordinator.slots_for_day(&doctor, query.date).await?;
    if let Some(tier) = query.tier {
        slots = in_tier(slots, tier);
    }

    let surcharge = state.coordinator.premium_surcharge_percent();
    let response = DaySlotsResponse {
        doctor_id: doctor.id,
        date: query.date,
        slots: slots
            .into_iter()
            .map(|slot| TimeSlotResponse {
                start: slot.start,
                end: slot.end,
                tier: slot.tier(),
                is_available: slot.is_available,
                fee: doctor.fee_for(slot.is_premium, surcharge),
            })
            .collect(),
    };

    Ok(Json(response))
}
