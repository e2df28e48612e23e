// --- File: crates/tourly_scheduling/src/repository.rs ---
//! Appointment storage.
//!
//! The repository is the sole writer of appointment state and re-enforces
//! the uniqueness and terminality invariants at the point of mutation, on
//! top of the service-layer checks. `create` and `transition` are atomic
//! with respect to the uniqueness check: the in-memory store runs both the
//! check and the write inside one critical section. A SQL-backed
//! implementation would carry a unique index on non-terminal
//! `(agent_id, scheduled_at)` rows instead.

use chrono::{NaiveDate, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use tourly_common::services::BoxFuture;
use uuid::Uuid;

use crate::error::SchedulingError;
use crate::models::{
    generate_public_id, Appointment, AppointmentStatus, HistoryEntry, NewAppointment,
    TransitionPatch,
};

/// Storage abstraction for appointments.
pub trait AppointmentRepository: Send + Sync {
    /// Persists a new appointment in status `Scheduled` with empty history.
    ///
    /// Fails with `Conflict` when `(agent_id, scheduled_at)` collides with
    /// an existing non-terminal appointment.
    fn create(&self, new: NewAppointment) -> BoxFuture<'_, Appointment, SchedulingError>;

    /// Applies a status transition plus optional field patch, appending
    /// exactly one history entry.
    ///
    /// Fails with `NotFound` for unknown ids, `InvalidState` when the
    /// current status is terminal, and `Conflict` when a patched
    /// `scheduled_at` collides with another non-terminal appointment of the
    /// same agent.
    fn transition(
        &self,
        id: Uuid,
        new_status: AppointmentStatus,
        patch: TransitionPatch,
    ) -> BoxFuture<'_, Appointment, SchedulingError>;

    fn find_by_id(&self, id: Uuid) -> BoxFuture<'_, Appointment, SchedulingError>;

    fn find_by_public_id(&self, public_id: &str) -> BoxFuture<'_, Appointment, SchedulingError>;

    /// Calendar days in `[range_start, range_end]` hosting at least one
    /// non-terminal appointment for the agent. Feeds the blocked-date
    /// registry. `exclude` discounts a single appointment, used when that
    /// appointment is itself being moved.
    fn list_non_terminal_dates(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> BoxFuture<'_, BTreeSet<NaiveDate>, SchedulingError>;

    /// All appointments for an agent in the range, ascending by start time.
    fn list_for_agent(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Appointment>, SchedulingError>;
}

/// In-memory implementation backing the service and the test suite.
///
/// One mutex guards the whole store, so the uniqueness check and the write
/// of `create`/`transition` form a single critical section; two concurrent
/// bookings for the same agent and slot cannot both succeed.
#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    store: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    by_id: HashMap<Uuid, Appointment>,
    by_public_id: HashMap<String, Uuid>,
}

impl Store {
    /// Whether another non-terminal appointment of the agent occupies the
    /// exact instant. `exclude` skips the appointment being moved.
    fn slot_taken(
        &self,
        agent_id: &str,
        scheduled_at: chrono::DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> bool {
        self.by_id.values().any(|a| {
            Some(a.id) != exclude
                && a.agent_id == agent_id
                && a.scheduled_at == scheduled_at
                && !a.is_terminal()
        })
    }
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AppointmentRepository for InMemoryAppointmentRepository {
    fn create(&self, new: NewAppointment) -> BoxFuture<'_, Appointment, SchedulingError> {
        Box::pin(async move {
            let mut store = self.store.lock().expect("repository lock poisoned");
            if store.slot_taken(&new.agent_id, new.scheduled_at, None) {
                return Err(SchedulingError::Conflict);
            }

            let mut public_id = generate_public_id();
            while store.by_public_id.contains_key(&public_id) {
                public_id = generate_public_id();
            }

            let now = Utc::now();
            let appointment = Appointment {
                id: Uuid::new_v4(),
                public_id: public_id.clone(),
                agent_id: new.agent_id,
                listing_id: new.listing_id,
                scheduled_at: new.scheduled_at,
                status: AppointmentStatus::Scheduled,
                client_contact: new.client_contact,
                notes: new.notes,
                history: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            store.by_public_id.insert(public_id, appointment.id);
            store.by_id.insert(appointment.id, appointment.clone());
            Ok(appointment)
        })
    }

    fn transition(
        &self,
        id: Uuid,
        new_status: AppointmentStatus,
        patch: TransitionPatch,
    ) -> BoxFuture<'_, Appointment, SchedulingError> {
        Box::pin(async move {
            let mut store = self.store.lock().expect("repository lock poisoned");

            let current = store
                .by_id
                .get(&id)
                .cloned()
                .ok_or_else(|| SchedulingError::NotFound("appointment".to_string()))?;
            if current.is_terminal() {
                return Err(SchedulingError::InvalidState);
            }
            if let Some(new_at) = patch.scheduled_at {
                // Re-checked here so a raced second reschedule observes the
                // already-updated time instead of applying a duplicate move.
                if new_at == current.scheduled_at {
                    return Err(SchedulingError::NoOpReschedule);
                }
                if store.slot_taken(&current.agent_id, new_at, Some(id)) {
                    return Err(SchedulingError::Conflict);
                }
            }

            let entry = HistoryEntry {
                from_status: current.status,
                to_status: new_status,
                previous_scheduled_at: current.scheduled_at,
                reason: patch.reason,
                timestamp: Utc::now(),
            };

            let appointment = store
                .by_id
                .get_mut(&id)
                .expect("checked above while holding the lock");
            appointment.status = new_status;
            if let Some(new_at) = patch.scheduled_at {
                appointment.scheduled_at = new_at;
            }
            appointment.history.push(entry);
            appointment.updated_at = Utc::now();
            Ok(appointment.clone())
        })
    }

    fn find_by_id(&self, id: Uuid) -> BoxFuture<'_, Appointment, SchedulingError> {
        Box::pin(async move {
            let store = self.store.lock().expect("repository lock poisoned");
            store
                .by_id
                .get(&id)
                .cloned()
                .ok_or_else(|| SchedulingError::NotFound("appointment".to_string()))
        })
    }

    fn find_by_public_id(&self, public_id: &str) -> BoxFuture<'_, Appointment, SchedulingError> {
        let public_id = public_id.to_string();
        Box::pin(async move {
            let store = self.store.lock().expect("repository lock poisoned");
            store
                .by_public_id
                .get(&public_id)
                .and_then(|id| store.by_id.get(id))
                .cloned()
                .ok_or_else(|| SchedulingError::NotFound("appointment".to_string()))
        })
    }

    fn list_non_terminal_dates(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> BoxFuture<'_, BTreeSet<NaiveDate>, SchedulingError> {
        let agent_id = agent_id.to_string();
        Box::pin(async move {
            let store = self.store.lock().expect("repository lock poisoned");
            Ok(store
                .by_id
                .values()
                .filter(|a| Some(a.id) != exclude && a.agent_id == agent_id && !a.is_terminal())
                .map(|a| a.scheduled_date())
                .filter(|d| (range_start..=range_end).contains(d))
                .collect())
        })
    }

    fn list_for_agent(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Appointment>, SchedulingError> {
        let agent_id = agent_id.to_string();
        Box::pin(async move {
            let store = self.store.lock().expect("repository lock poisoned");
            let mut appointments: Vec<Appointment> = store
                .by_id
                .values()
                .filter(|a| a.agent_id == agent_id)
                .filter(|a| (range_start..=range_end).contains(&a.scheduled_date()))
                .filter(|a| include_cancelled || a.status != AppointmentStatus::Cancelled)
                .cloned()
                .collect();
            appointments.sort_by_key(|a| a.scheduled_at);
            Ok(appointments)
        })
    }
}
