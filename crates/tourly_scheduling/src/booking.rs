// --- File: crates/tourly_scheduling/src/booking.rs ---
//! Booking orchestration: validates a tour request end to end, then asks the
//! repository to persist it atomically.

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tourly_common::services::{BoxedError, IdentityService, ListingDirectoryService};
use tourly_config::AppConfig;
use tracing::{debug, warn};

use crate::blocked::BlockedDateRegistry;
use crate::error::{ContactField, SchedulingError};
use crate::horizon::AvailabilityWindow;
use crate::models::{slot_datetime, Appointment, ClientContact, NewAppointment, MAX_NOTES_LEN};
use crate::repository::AppointmentRepository;
use crate::slots::SlotGrid;

/// A validated-or-not booking command. Wire parsing happens in the handler;
/// the service works on calendar types.
#[derive(Debug, Clone)]
pub struct BookTour {
    pub agent_id: String,
    pub listing_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Absent contact details are prefilled from the identity layer when a
    /// session exists; booking never requires one.
    pub contact: Option<ClientContact>,
    pub notes: Option<String>,
}

pub struct BookingService {
    config: Arc<AppConfig>,
    grid: Arc<SlotGrid>,
    registry: Arc<BlockedDateRegistry>,
    repository: Arc<dyn AppointmentRepository>,
    directory: Option<Arc<dyn ListingDirectoryService<Error = BoxedError>>>,
    identity: Option<Arc<dyn IdentityService<Error = BoxedError>>>,
}

impl BookingService {
    pub fn new(
        config: Arc<AppConfig>,
        grid: Arc<SlotGrid>,
        registry: Arc<BlockedDateRegistry>,
        repository: Arc<dyn AppointmentRepository>,
        directory: Option<Arc<dyn ListingDirectoryService<Error = BoxedError>>>,
        identity: Option<Arc<dyn IdentityService<Error = BoxedError>>>,
    ) -> Self {
        Self {
            config,
            grid,
            registry,
            repository,
            directory,
            identity,
        }
    }

    /// Books a tour.
    ///
    /// Checks run in a fixed order, each failing fast with its own error:
    /// horizon, slot grid, contact fields, notes bound, agent/listing
    /// existence, blocked date. The repository's atomic uniqueness check is
    /// the final word; losing that race surfaces as `SlotUnavailable`, the
    /// same condition the advisory blocked-date check reports.
    pub async fn book(&self, request: BookTour) -> Result<Appointment, SchedulingError> {
        let window = AvailabilityWindow::current(&self.config.scheduling);
        if !window.is_within_horizon(request.date) {
            return Err(SchedulingError::OutOfHorizon);
        }
        if !self.grid.is_valid_slot(request.time) {
            return Err(SchedulingError::InvalidSlot);
        }

        let contact = self.resolve_contact(request.contact).await;
        validate_contact(&contact)?;
        validate_notes(request.notes.as_deref())?;

        self.check_directory(&request.agent_id, &request.listing_id)
            .await?;

        if self
            .registry
            .is_blocked(&request.agent_id, request.date)
            .await?
        {
            return Err(SchedulingError::SlotUnavailable);
        }

        let scheduled_at = slot_datetime(request.date, request.time);
        debug!(agent_id = %request.agent_id, %scheduled_at, "creating appointment");

        match self
            .repository
            .create(NewAppointment {
                agent_id: request.agent_id,
                listing_id: request.listing_id,
                scheduled_at,
                client_contact: contact,
                notes: request.notes,
            })
            .await
        {
            // Lost a race to a concurrent booking; to the caller this is the
            // same condition as a pre-checked blocked slot.
            Err(SchedulingError::Conflict) => Err(SchedulingError::SlotUnavailable),
            other => other,
        }
    }

    async fn resolve_contact(&self, provided: Option<ClientContact>) -> ClientContact {
        if let Some(contact) = provided {
            return contact;
        }
        if let Some(identity) = &self.identity {
            match identity.current_user().await {
                Ok(Some(user)) => {
                    return ClientContact {
                        name: user.name,
                        email: user.email,
                        phone: user.phone,
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(%err, "identity service unavailable, contact must be supplied manually");
                }
            }
        }
        ClientContact {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }

    async fn check_directory(
        &self,
        agent_id: &str,
        listing_id: &str,
    ) -> Result<(), SchedulingError> {
        let Some(directory) = &self.directory else {
            return Ok(());
        };
        let agent_ok = directory.agent_exists(agent_id).await.map_err(|err| {
            SchedulingError::UpstreamUnavailable(format!("listing directory: {err}"))
        })?;
        if !agent_ok {
            return Err(SchedulingError::NotFound("agent".to_string()));
        }
        let listing_ok = directory.listing_exists(listing_id).await.map_err(|err| {
            SchedulingError::UpstreamUnavailable(format!("listing directory: {err}"))
        })?;
        if !listing_ok {
            return Err(SchedulingError::NotFound("listing".to_string()));
        }
        Ok(())
    }
}

pub(crate) fn validate_contact(contact: &ClientContact) -> Result<(), SchedulingError> {
    if contact.name.trim().is_empty() {
        return Err(SchedulingError::InvalidContact(ContactField::Name));
    }
    if !is_valid_email(&contact.email) {
        return Err(SchedulingError::InvalidContact(ContactField::Email));
    }
    if digit_count(&contact.phone) < 10 {
        return Err(SchedulingError::InvalidContact(ContactField::Phone));
    }
    Ok(())
}

pub(crate) fn validate_notes(notes: Option<&str>) -> Result<(), SchedulingError> {
    match notes {
        Some(text) if text.chars().count() > MAX_NOTES_LEN => Err(SchedulingError::NotesTooLong),
        _ => Ok(()),
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}
