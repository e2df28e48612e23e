// --- File: crates/tourly_scheduling/src/blocked.rs ---
//! Blocked-date registry.
//!
//! A calendar day is blocked for an agent when any non-terminal appointment
//! falls on it (whole-day policy, one tour per agent per day) or when the
//! agent's external manual block source lists it. Blocking is derived on
//! every query, never stored, so it cannot drift from the appointment data.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;
use tourly_common::services::{BoxedError, ManualBlockService};
use tracing::warn;
use uuid::Uuid;

use crate::error::SchedulingError;
use crate::repository::AppointmentRepository;

pub struct BlockedDateRegistry {
    repository: Arc<dyn AppointmentRepository>,
    manual_blocks: Option<Arc<dyn ManualBlockService<Error = BoxedError>>>,
}

impl BlockedDateRegistry {
    pub fn new(
        repository: Arc<dyn AppointmentRepository>,
        manual_blocks: Option<Arc<dyn ManualBlockService<Error = BoxedError>>>,
    ) -> Self {
        Self {
            repository,
            manual_blocks,
        }
    }

    /// Dates in `[range_start, range_end]` with no bookable slots for the
    /// agent.
    ///
    /// Fails closed: when the manual block source is unreachable the whole
    /// queried range is reported blocked, trading availability for
    /// double-booking safety.
    pub async fn blocked_dates(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>, SchedulingError> {
        self.blocked_dates_excluding(agent_id, range_start, range_end, None)
            .await
    }

    /// Like `blocked_dates`, but discounts one appointment's own whole-day
    /// block. Manual blocks and every other appointment still count; used
    /// when validating a reschedule of that appointment.
    pub async fn blocked_dates_excluding(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<BTreeSet<NaiveDate>, SchedulingError> {
        if range_end < range_start {
            return Ok(BTreeSet::new());
        }

        let mut blocked = self
            .repository
            .list_non_terminal_dates(agent_id, range_start, range_end, exclude)
            .await?;

        if let Some(source) = &self.manual_blocks {
            match source
                .manual_blocked_dates(agent_id, range_start, range_end)
                .await
            {
                Ok(manual) => {
                    blocked.extend(
                        manual
                            .into_iter()
                            .filter(|d| (range_start..=range_end).contains(d)),
                    );
                }
                Err(err) => {
                    warn!(
                        agent_id,
                        %err,
                        "manual block source unreachable, reporting range as fully blocked"
                    );
                    return Ok(range_start
                        .iter_days()
                        .take_while(|d| *d <= range_end)
                        .collect());
                }
            }
        }

        Ok(blocked)
    }

    /// Whether a single date is blocked for the agent.
    pub async fn is_blocked(
        &self,
        agent_id: &str,
        date: NaiveDate,
    ) -> Result<bool, SchedulingError> {
        Ok(self
            .blocked_dates(agent_id, date, date)
            .await?
            .contains(&date))
    }

    /// Whether a single date is blocked for the agent, discounting one
    /// appointment's own contribution.
    pub async fn is_blocked_excluding(
        &self,
        agent_id: &str,
        date: NaiveDate,
        exclude: Uuid,
    ) -> Result<bool, SchedulingError> {
        Ok(self
            .blocked_dates_excluding(agent_id, date, date, Some(exclude))
            .await?
            .contains(&date))
    }
}
