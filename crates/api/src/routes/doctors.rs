use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/doctors", get(handlers::doctors::list_doctors))
        .route("/api/doctors/grouped", get(handlers::doctors::grouped_doctors))
        .route("/api/doctors/:id", get(handlers::doctors::get_doctor))
        .route("/api/doctors/:id/slots", get(handlers::slots::get_day_slots))
}
