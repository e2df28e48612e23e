// File: crates/tourly_scheduling/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers::{
    AppointmentsQuery, AppointmentsResponse, BookTourRequest, CalendarQuery, CalendarResponse,
    RescheduleRequest, SlotsResponse,
};
use crate::horizon::YearMonth;
use crate::models::{Appointment, AppointmentStatus, ClientContact, HistoryEntry};

#[utoipa::path(
    get,
    path = "/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Bookable and blocked days for the month", body = CalendarResponse),
        (status = 400, description = "Invalid month", body = ErrorBody),
        (status = 409, description = "Month outside the booking horizon", body = ErrorBody)
    )
)]
fn doc_get_calendar_handler() {}

#[utoipa::path(
    get,
    path = "/slots",
    responses(
        (status = 200, description = "The fixed daily slot grid", body = SlotsResponse,
         example = json!({ "slots": ["09:00", "09:30", "10:00"] })
        )
    )
)]
fn doc_get_slots_handler() {}

#[utoipa::path(
    post,
    path = "/book",
    request_body(content = BookTourRequest, example = json!({
        "agent_id": "agent-1",
        "listing_id": "listing-12",
        "date": "2025-03-11",
        "time": "09:00",
        "contact": { "name": "Jane", "email": "jane@x.com", "phone": "1234567890" }
    })),
    responses(
        (status = 200, description = "The created appointment", body = Appointment),
        (status = 400, description = "A validation precondition failed", body = ErrorBody),
        (status = 404, description = "Agent or listing not found", body = ErrorBody),
        (status = 409, description = "Slot no longer available", body = ErrorBody,
         example = json!({ "error": "slot_unavailable", "message": "Requested slot is no longer available" })
        ),
        (status = 503, description = "Upstream collaborator unreachable", body = ErrorBody)
    )
)]
fn doc_book_tour_handler() {}

#[utoipa::path(
    patch,
    path = "/appointments/{id}/reschedule",
    params(
        ("id" = String, Path, description = "Appointment id")
    ),
    request_body(content = RescheduleRequest, example = json!({
        "new_date": "2025-03-12",
        "new_time": "10:00",
        "reason": "client unavailable"
    })),
    responses(
        (status = 200, description = "The updated appointment", body = Appointment),
        (status = 400, description = "A validation precondition failed", body = ErrorBody),
        (status = 404, description = "Appointment not found", body = ErrorBody),
        (status = 409, description = "Slot unavailable or appointment already terminal", body = ErrorBody)
    )
)]
fn doc_reschedule_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/{id}/cancel",
    params(
        ("id" = String, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "The cancelled appointment", body = Appointment),
        (status = 404, description = "Appointment not found", body = ErrorBody),
        (status = 409, description = "Appointment already terminal", body = ErrorBody)
    )
)]
fn doc_cancel_handler() {}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    params(
        ("id" = String, Path, description = "Appointment id or public code")
    ),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 404, description = "Appointment not found", body = ErrorBody)
    )
)]
fn doc_get_appointment_handler() {}

#[utoipa::path(
    get,
    path = "/admin/appointments",
    params(AppointmentsQuery),
    responses(
        (status = 200, description = "Appointments for the agent in the range", body = AppointmentsResponse),
        (status = 400, description = "Invalid date range", body = ErrorBody)
    )
)]
fn doc_list_appointments_handler() {}

#[utoipa::path(
    post,
    path = "/admin/appointments/{id}/complete",
    params(
        ("id" = String, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "The completed appointment", body = Appointment),
        (status = 404, description = "Appointment not found", body = ErrorBody),
        (status = 409, description = "Appointment already terminal", body = ErrorBody)
    )
)]
fn doc_complete_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_calendar_handler,
        doc_get_slots_handler,
        doc_book_tour_handler,
        doc_reschedule_handler,
        doc_cancel_handler,
        doc_get_appointment_handler,
        doc_list_appointments_handler,
        doc_complete_handler
    ),
    components(
        schemas(
            CalendarResponse,
            SlotsResponse,
            BookTourRequest,
            RescheduleRequest,
            AppointmentsResponse,
            Appointment,
            AppointmentStatus,
            ClientContact,
            HistoryEntry,
            YearMonth,
            ErrorBody
        )
    ),
    tags(
        (name = "scheduling", description = "Tour Scheduling API")
    ),
    servers(
        (url = "/api", description = "Main API Prefix")
    )
)]
pub struct SchedulingApiDoc;
