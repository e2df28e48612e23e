// --- File: crates/tourly_scheduling/src/routes.rs ---

use crate::handlers::{
    book_tour_handler, cancel_handler, complete_handler, get_appointment_handler,
    get_calendar_handler, get_slots_handler, list_appointments_handler, reschedule_handler,
    SchedulingState,
};
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tourly_common::services::ServiceFactory;
use tourly_config::AppConfig;

use crate::repository::AppointmentRepository;

/// Creates a router containing all routes for the scheduling feature.
pub fn routes(
    config: Arc<AppConfig>,
    repository: Arc<dyn AppointmentRepository>,
    services: Arc<dyn ServiceFactory>,
) -> Router {
    let state = SchedulingState::new(config, repository, services)
        .expect("Scheduling configuration invalid");

    Router::new()
        .route("/calendar", get(get_calendar_handler))
        .route("/slots", get(get_slots_handler))
        .route("/book", post(book_tour_handler))
        .route("/appointments/{id}", get(get_appointment_handler))
        .route("/appointments/{id}/reschedule", patch(reschedule_handler))
        .route("/appointments/{id}/cancel", post(cancel_handler))
        .route("/admin/appointments", get(list_appointments_handler))
        .route("/admin/appointments/{id}/complete", post(complete_handler))
        .with_state(Arc::new(state))
}
