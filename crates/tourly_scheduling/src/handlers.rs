// --- File: crates/tourly_scheduling/src/handlers.rs ---
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tourly_common::services::ServiceFactory;
use tourly_common::HttpStatusCode;
use tourly_config::AppConfig;
use tracing::info;
use uuid::Uuid;

use crate::blocked::BlockedDateRegistry;
use crate::booking::{BookTour, BookingService};
use crate::cancellation::CancellationService;
use crate::error::{ErrorBody, SchedulingError};
use crate::horizon::{AvailabilityWindow, YearMonth};
use crate::models::{Appointment, ClientContact};
use crate::repository::AppointmentRepository;
use crate::reschedule::{RescheduleService, RescheduleTour};
use crate::slots::SlotGrid;

/// Shared state for the scheduling routes.
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<dyn AppointmentRepository>,
    pub grid: Arc<SlotGrid>,
    pub registry: Arc<BlockedDateRegistry>,
    pub booking: BookingService,
    pub reschedule: RescheduleService,
    pub cancellation: CancellationService,
}

impl SchedulingState {
    pub fn new(
        config: Arc<AppConfig>,
        repository: Arc<dyn AppointmentRepository>,
        services: Arc<dyn ServiceFactory>,
    ) -> Result<Self, SchedulingError> {
        let grid = Arc::new(SlotGrid::from_config(&config.scheduling)?);
        let registry = Arc::new(BlockedDateRegistry::new(
            repository.clone(),
            services.manual_block_service(),
        ));
        let booking = BookingService::new(
            config.clone(),
            grid.clone(),
            registry.clone(),
            repository.clone(),
            services.directory_service(),
            services.identity_service(),
        );
        let reschedule = RescheduleService::new(
            config.clone(),
            grid.clone(),
            registry.clone(),
            repository.clone(),
        );
        let cancellation = CancellationService::new(repository.clone());
        Ok(Self {
            config,
            repository,
            grid,
            registry,
            booking,
            reschedule,
            cancellation,
        })
    }
}

type Rejection = (StatusCode, Json<ErrorBody>);

fn reject(err: SchedulingError) -> Rejection {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody::from(&err)))
}

fn bad_request(error: &'static str, message: String) -> Rejection {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error, message }))
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, Rejection> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        bad_request(
            "invalid_date",
            format!("Invalid {field} format (YYYY-MM-DD)"),
        )
    })
}

fn parse_time(value: &str, field: &str) -> Result<NaiveTime, Rejection> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| bad_request("invalid_slot", format!("Invalid {field} format (HH:MM)")))
}

// --- Calendar ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarQuery {
    pub agent_id: String,
    /// Calendar year, e.g. 2025
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarResponse {
    pub month: YearMonth,
    /// Days of the month inside the booking horizon.
    pub days: Vec<NaiveDate>,
    /// Days with no bookable slots for the agent.
    pub blocked_dates: Vec<NaiveDate>,
}

/// Handler for the month calendar view: bookable days plus blocked days.
#[axum::debug_handler]
pub async fn get_calendar_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, Rejection> {
    let requested = YearMonth::new(query.year, query.month)
        .ok_or_else(|| bad_request("invalid_date", format!("Invalid month: {}", query.month)))?;

    let window = AvailabilityWindow::current(&state.config.scheduling);
    let month = window
        .clamp_navigation(requested)
        .ok_or_else(|| reject(SchedulingError::OutOfHorizon))?;

    let range_start = month.first_day().max(window.horizon_start());
    let range_end = month.last_day().min(window.horizon_end());

    let blocked = state
        .registry
        .blocked_dates(&query.agent_id, range_start, range_end)
        .await
        .map_err(reject)?;

    let days = range_start
        .iter_days()
        .take_while(|d| *d <= range_end)
        .collect();

    Ok(Json(CalendarResponse {
        month,
        days,
        blocked_dates: blocked.into_iter().collect(),
    }))
}

// --- Slots ---

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    /// Grid times of day, "HH:MM", ascending.
    pub slots: Vec<String>,
}

/// Handler for the fixed daily slot grid. Identical for every business day.
#[axum::debug_handler]
pub async fn get_slots_handler(
    State(state): State<Arc<SchedulingState>>,
) -> Json<SlotsResponse> {
    let slots = state
        .grid
        .generate_slots()
        .into_iter()
        .map(|t| t.format("%H:%M").to_string())
        .collect();
    Json(SlotsResponse { slots })
}

// --- Booking ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookTourRequest {
    pub agent_id: String,
    pub listing_id: String,
    /// Tour day, YYYY-MM-DD
    pub date: String,
    /// Grid time, HH:MM
    pub time: String,
    /// Omitted contact details are prefilled from the active session.
    pub contact: Option<ClientContact>,
    pub notes: Option<String>,
}

/// Handler to book a tour.
#[axum::debug_handler]
pub async fn book_tour_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<BookTourRequest>,
) -> Result<Json<Appointment>, Rejection> {
    let date = parse_date(&payload.date, "date")?;
    let time = parse_time(&payload.time, "time")?;

    let appointment = state
        .booking
        .book(BookTour {
            agent_id: payload.agent_id,
            listing_id: payload.listing_id,
            date,
            time,
            contact: payload.contact,
            notes: payload.notes,
        })
        .await
        .map_err(reject)?;

    info!(public_id = %appointment.public_id, "tour booked");
    Ok(Json(appointment))
}

// --- Reschedule ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RescheduleRequest {
    /// New tour day, YYYY-MM-DD
    pub new_date: String,
    /// New grid time, HH:MM
    pub new_time: String,
    pub reason: String,
}

/// Handler to move an appointment to a different slot.
#[axum::debug_handler]
pub async fn reschedule_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<Appointment>, Rejection> {
    let new_date = parse_date(&payload.new_date, "new_date")?;
    let new_time = parse_time(&payload.new_time, "new_time")?;

    let appointment = state
        .reschedule
        .reschedule(RescheduleTour {
            appointment_id: id,
            new_date,
            new_time,
            reason: payload.reason,
        })
        .await
        .map_err(reject)?;

    Ok(Json(appointment))
}

// --- Cancellation / completion ---

/// Handler to cancel an appointment.
#[axum::debug_handler]
pub async fn cancel_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, Rejection> {
    state.cancellation.cancel(id).await.map(Json).map_err(reject)
}

/// Handler for the external completion trigger.
#[axum::debug_handler]
pub async fn complete_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, Rejection> {
    state
        .cancellation
        .complete(id)
        .await
        .map(Json)
        .map_err(reject)
}

// --- Lookup ---

/// Handler to fetch an appointment by internal id or public code.
#[axum::debug_handler]
pub async fn get_appointment_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id_or_public_id): Path<String>,
) -> Result<Json<Appointment>, Rejection> {
    let result = match Uuid::parse_str(&id_or_public_id) {
        Ok(id) => state.repository.find_by_id(id).await,
        Err(_) => state.repository.find_by_public_id(&id_or_public_id).await,
    };
    result.map(Json).map_err(reject)
}

// --- Admin listing ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AppointmentsQuery {
    pub agent_id: String,
    /// Start date in YYYY-MM-DD format
    pub start_date: String,
    /// End date in YYYY-MM-DD format
    pub end_date: String,
    /// Whether to include cancelled appointments
    pub include_cancelled: Option<bool>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

/// Handler to list an agent's appointments over a date range.
#[axum::debug_handler]
pub async fn list_appointments_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<AppointmentsResponse>, Rejection> {
    let start_date = parse_date(&query.start_date, "start_date")?;
    let end_date = parse_date(&query.end_date, "end_date")?;
    if end_date < start_date {
        return Err(bad_request(
            "invalid_date",
            "end_date must not precede start_date".to_string(),
        ));
    }

    let appointments = state
        .repository
        .list_for_agent(
            &query.agent_id,
            start_date,
            end_date,
            query.include_cancelled.unwrap_or(false),
        )
        .await
        .map_err(reject)?;

    Ok(Json(AppointmentsResponse { appointments }))
}
