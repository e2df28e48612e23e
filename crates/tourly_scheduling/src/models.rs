// --- File: crates/tourly_scheduling/src/models.rs ---
//! Core data model for tour appointments.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on free-text notes attached to an appointment.
pub const MAX_NOTES_LEN: usize = 500;

/// Appointment lifecycle states.
///
/// `Completed` and `Cancelled` are terminal; once reached, every further
/// mutation attempt fails.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Rescheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }
}

/// Client contact details captured at booking time.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One entry in an appointment's append-only transition log.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub from_status: AppointmentStatus,
    pub to_status: AppointmentStatus,
    /// The appointment's `scheduled_at` before this transition.
    pub previous_scheduled_at: DateTime<Utc>,
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A booked tour.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Opaque unique identifier, assigned at creation.
    pub id: Uuid,
    /// Human-shareable identifier used in URLs and communications.
    pub public_id: String,
    pub agent_id: String,
    pub listing_id: String,
    /// Absolute tour start time (UTC), aligned to the slot grid.
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub client_contact: ClientContact,
    pub notes: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Calendar day of the tour.
    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_at.date_naive()
    }
}

/// Input to `AppointmentRepository::create`.
///
/// Identifiers and timestamps are assigned by the repository so that
/// creation stays a single atomic step.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub agent_id: String,
    pub listing_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub client_contact: ClientContact,
    pub notes: Option<String>,
}

/// Field updates applied by `AppointmentRepository::transition`.
#[derive(Debug, Clone, Default)]
pub struct TransitionPatch {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
}

/// Combines a calendar day and a grid time into the stored UTC instant.
/// The business calendar is expressed in UTC; the configured time zone only
/// decides what "today" is.
pub fn slot_datetime(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(time))
}

/// Generates a short human-shareable appointment code, e.g. `TOUR-9F4C21AB`.
pub fn generate_public_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("TOUR-{}", hex[..8].to_uppercase())
}
