use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            post(handlers::appointments::book_appointment)
                .get(handlers::appointments::list_appointments),
        )
        .route(
            "/api/appointments/:id/complete",
            post(handlers::appointments::complete_appointment),
        )
}
