// --- File: crates/tourly_scheduling/src/reschedule.rs ---
//! Reschedule orchestration: moves a non-terminal appointment to a genuinely
//! different slot and records why.

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tourly_config::AppConfig;
use tracing::debug;
use uuid::Uuid;

use crate::blocked::BlockedDateRegistry;
use crate::error::SchedulingError;
use crate::horizon::AvailabilityWindow;
use crate::models::{slot_datetime, Appointment, AppointmentStatus, TransitionPatch};
use crate::repository::AppointmentRepository;
use crate::slots::SlotGrid;

#[derive(Debug, Clone)]
pub struct RescheduleTour {
    pub appointment_id: Uuid,
    pub new_date: NaiveDate,
    pub new_time: NaiveTime,
    pub reason: String,
}

pub struct RescheduleService {
    config: Arc<AppConfig>,
    grid: Arc<SlotGrid>,
    registry: Arc<BlockedDateRegistry>,
    repository: Arc<dyn AppointmentRepository>,
}

impl RescheduleService {
    pub fn new(
        config: Arc<AppConfig>,
        grid: Arc<SlotGrid>,
        registry: Arc<BlockedDateRegistry>,
        repository: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self {
            config,
            grid,
            registry,
            repository,
        }
    }

    /// Moves an appointment to a new slot.
    ///
    /// `Scheduled -> Rescheduled` and `Rescheduled -> Rescheduled` are both
    /// legal; terminal appointments reject with `InvalidState`. The
    /// blocked-date check discounts the appointment's own whole-day block,
    /// so a same-day time change stays possible, while manual blocks and
    /// other appointments on the target day still reject; exact-slot
    /// collisions are enforced by the repository.
    pub async fn reschedule(&self, request: RescheduleTour) -> Result<Appointment, SchedulingError> {
        let appointment = self.repository.find_by_id(request.appointment_id).await?;
        if appointment.is_terminal() {
            return Err(SchedulingError::InvalidState);
        }

        let window = AvailabilityWindow::current(&self.config.scheduling);
        if !window.is_within_horizon(request.new_date) {
            return Err(SchedulingError::OutOfHorizon);
        }
        if !self.grid.is_valid_slot(request.new_time) {
            return Err(SchedulingError::InvalidSlot);
        }

        let new_at = slot_datetime(request.new_date, request.new_time);
        if new_at == appointment.scheduled_at {
            return Err(SchedulingError::NoOpReschedule);
        }
        if request.reason.trim().is_empty() {
            return Err(SchedulingError::ReasonRequired);
        }

        if self
            .registry
            .is_blocked_excluding(&appointment.agent_id, request.new_date, appointment.id)
            .await?
        {
            return Err(SchedulingError::SlotUnavailable);
        }

        debug!(
            appointment_id = %request.appointment_id,
            from = %appointment.scheduled_at,
            to = %new_at,
            "rescheduling appointment"
        );

        match self
            .repository
            .transition(
                request.appointment_id,
                AppointmentStatus::Rescheduled,
                TransitionPatch {
                    scheduled_at: Some(new_at),
                    reason: Some(request.reason),
                },
            )
            .await
        {
            // Lost a race to a booking that claimed the slot first.
            Err(SchedulingError::Conflict) => Err(SchedulingError::SlotUnavailable),
            other => other,
        }
    }
}
