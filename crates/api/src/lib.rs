//! # Slotbook API
//!
//! HTTP surface of the appointment scheduling engine: doctor search, the
//! two-week calendar, day slots with live availability, booking, and the
//! patient's appointment list.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure, one module per resource
//! - **Handlers**: translate requests into calls on the core engine
//! - **Middleware**: patient identity extraction and error mapping
//! - **Config**: environment driven settings
//! - **Calendar sync**: collaborators receiving calendar events
//!
//! Handlers never talk to the database directly. They go through the
//! [`BookingCoordinator`] and the [`DoctorDirectory`] held in [`ApiState`],
//! so the same router runs against PostgreSQL or the in-memory store.

/// Calendar collaborators
pub mod calendar_sync;
/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Identity extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    http::{HeaderName, HeaderValue, Method, header},
};
use eyre::Result;
use slotbook_core::{
    booking::BookingCoordinator, calendar::CalendarNavigator, config::SchedulingConfig,
    errors::ScheduleError, models::doctor::Doctor, store::DoctorDirectory,
};
use slotbook_db::{DbPool, PgStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use crate::middleware::auth::PATIENT_ID_HEADER;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub coordinator: BookingCoordinator,
    pub doctors: Arc<dyn DoctorDirectory>,
    pub navigator: CalendarNavigator,
}

impl ApiState {
    pub fn new(
        config: &SchedulingConfig,
        coordinator: BookingCoordinator,
        doctors: Arc<dyn DoctorDirectory>,
    ) -> Self {
        Self {
            coordinator,
            doctors,
            navigator: CalendarNavigator::new(config.week_start),
        }
    }

    pub async fn find_doctor(&self, id: Uuid) -> Result<Doctor, ScheduleError> {
        self.doctors
            .get_doctor(id)
            .await
            .map_err(ScheduleError::Database)?
            .ok_or_else(|| ScheduleError::NotFound(format!("Doctor with ID {} not found", id)))
    }
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Doctor search and day slots
        .merge(routes::doctors::routes())
        // Two-week date grid
        .merge(routes::calendar::routes())
        // Booking and appointment history
        .merge(routes::appointments::routes())
        .with_state(state)
}

/// Starts the API server backed by PostgreSQL
///
/// Sets up logging, wires the stores and calendar collaborator into the
/// booking coordinator, configures routes, and serves until shutdown.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = slotbook_api::config::ApiConfig::from_env()?;
/// let db_pool = slotbook_db::create_pool(&config.database_url).await?;
/// slotbook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = Arc::new(PgStore::new(db_pool));
    let calendar = calendar_sync::calendar_sink(config.calendar_webhook_url.as_deref());
    if config.calendar_webhook_url.is_none() {
        info!("CALENDAR_WEBHOOK_URL not set, calendar events are only logged");
    }

    let coordinator = BookingCoordinator::new(
        &config.scheduling,
        store.clone(),
        store.clone(),
        calendar,
    );
    let state = Arc::new(ApiState::new(&config.scheduling, coordinator, store));

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
                HeaderName::from_static(PATIENT_ID_HEADER),
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(middleware::error_handling::handle_timeout))
            .timeout(std::time::Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
