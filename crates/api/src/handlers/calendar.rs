use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use slotbook_core::calendar::CalendarResponse;

use crate::ApiState;

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// Defaults to today.
    pub base: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CalendarQuery>,
) -> Json<CalendarResponse> {
    let today = Utc::now().date_naive();
    Json(state.navigator.grid(query.base.unwrap_or(today), today))
}
