// --- File: crates/tourly_scheduling/src/cancellation.rs ---
//! Terminal transitions: cancellation and completion.
//!
//! Cancelling is deliberately not idempotent: a second cancel fails with
//! `InvalidState` so callers holding a stale view find out. Freed dates
//! reappear on the next blocked-date query, since blocking is derived.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::SchedulingError;
use crate::models::{Appointment, AppointmentStatus, TransitionPatch};
use crate::repository::AppointmentRepository;

pub struct CancellationService {
    repository: Arc<dyn AppointmentRepository>,
}

impl CancellationService {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    /// Cancels a non-terminal appointment.
    pub async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, SchedulingError> {
        let appointment = self
            .repository
            .transition(
                appointment_id,
                AppointmentStatus::Cancelled,
                TransitionPatch::default(),
            )
            .await?;
        info!(%appointment_id, public_id = %appointment.public_id, "appointment cancelled");
        Ok(appointment)
    }

    /// Marks an appointment completed. Completion is triggered externally
    /// (agent action or elapsed-time job) but always lands here, so
    /// terminality is enforced in exactly one place.
    pub async fn complete(&self, appointment_id: Uuid) -> Result<Appointment, SchedulingError> {
        let appointment = self
            .repository
            .transition(
                appointment_id,
                AppointmentStatus::Completed,
                TransitionPatch::default(),
            )
            .await?;
        info!(%appointment_id, public_id = %appointment.public_id, "appointment completed");
        Ok(appointment)
    }
}
