// --- File: crates/tourly_scheduling/src/error.rs ---
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tourly_common::HttpStatusCode;

use crate::models::MAX_NOTES_LEN;

/// The contact field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactField::Name => write!(f, "name"),
            ContactField::Email => write!(f, "email"),
            ContactField::Phone => write!(f, "phone"),
        }
    }
}

/// Errors produced by the scheduling core.
///
/// Every rejected operation carries the precondition that failed; callers
/// redraw their calendar/slot view from the `kind` code. `Conflict` is
/// repository-internal and is translated to `SlotUnavailable` before it
/// reaches a caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("Requested date is outside the booking horizon")]
    OutOfHorizon,
    #[error("Requested time is not on the bookable slot grid")]
    InvalidSlot,
    #[error("Invalid contact {0}")]
    InvalidContact(ContactField),
    #[error("Notes exceed the maximum length of {MAX_NOTES_LEN} characters")]
    NotesTooLong,
    #[error("Requested slot is no longer available")]
    SlotUnavailable,
    #[error("New time must differ from the current appointment time")]
    NoOpReschedule,
    #[error("A reschedule reason is required")]
    ReasonRequired,
    #[error("{0} not found")]
    NotFound(String),
    #[error("Appointment is in a terminal state")]
    InvalidState,
    #[error("Booking conflict")]
    Conflict,
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchedulingError {
    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            SchedulingError::OutOfHorizon => "out_of_horizon",
            SchedulingError::InvalidSlot => "invalid_slot",
            SchedulingError::InvalidContact(_) => "invalid_contact",
            SchedulingError::NotesTooLong => "notes_too_long",
            SchedulingError::SlotUnavailable => "slot_unavailable",
            SchedulingError::NoOpReschedule => "noop_reschedule",
            SchedulingError::ReasonRequired => "reason_required",
            SchedulingError::NotFound(_) => "not_found",
            SchedulingError::InvalidState => "invalid_state",
            SchedulingError::Conflict => "conflict",
            SchedulingError::UpstreamUnavailable(_) => "upstream_unavailable",
            SchedulingError::Config(_) => "config_error",
        }
    }
}

impl HttpStatusCode for SchedulingError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulingError::OutOfHorizon
            | SchedulingError::InvalidSlot
            | SchedulingError::InvalidContact(_)
            | SchedulingError::NotesTooLong
            | SchedulingError::NoOpReschedule
            | SchedulingError::ReasonRequired => 400,
            SchedulingError::SlotUnavailable
            | SchedulingError::InvalidState
            | SchedulingError::Conflict => 409,
            SchedulingError::NotFound(_) => 404,
            SchedulingError::UpstreamUnavailable(_) => 503,
            SchedulingError::Config(_) => 500,
        }
    }
}

/// JSON error body returned by the HTTP layer.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code, e.g. "out_of_horizon".
    pub error: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl From<&SchedulingError> for ErrorBody {
    fn from(err: &SchedulingError) -> Self {
        ErrorBody {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}
