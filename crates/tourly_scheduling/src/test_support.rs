//! Shared fixtures for the in-crate test suite.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tourly_common::services::{
    BoxFuture, BoxedError, IdentityService, ListingDirectoryService, ManualBlockService,
    UserProfile,
};
use tourly_config::AppConfig;

use crate::blocked::BlockedDateRegistry;
use crate::booking::{BookTour, BookingService};
use crate::cancellation::CancellationService;
use crate::models::ClientContact;
use crate::repository::{AppointmentRepository, InMemoryAppointmentRepository};
use crate::reschedule::RescheduleService;
use crate::slots::SlotGrid;

pub(crate) fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig::default())
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub(crate) fn in_days(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub(crate) fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time")
}

pub(crate) fn jane() -> ClientContact {
    ClientContact {
        name: "Jane".to_string(),
        email: "jane@x.com".to_string(),
        phone: "1234567890".to_string(),
    }
}

pub(crate) fn book_request(
    agent_id: &str,
    listing_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> BookTour {
    BookTour {
        agent_id: agent_id.to_string(),
        listing_id: listing_id.to_string(),
        date,
        time,
        contact: Some(jane()),
        notes: None,
    }
}

// --- Collaborator stand-ins ---

pub(crate) struct StaticManualBlocks(pub BTreeSet<NaiveDate>);

impl ManualBlockService for StaticManualBlocks {
    type Error = BoxedError;

    fn manual_blocked_dates(
        &self,
        _agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> BoxFuture<'_, BTreeSet<NaiveDate>, Self::Error> {
        let dates: BTreeSet<NaiveDate> = self
            .0
            .iter()
            .copied()
            .filter(|d| (range_start..=range_end).contains(d))
            .collect();
        Box::pin(async move { Ok(dates) })
    }
}

pub(crate) struct FailingManualBlocks;

impl ManualBlockService for FailingManualBlocks {
    type Error = BoxedError;

    fn manual_blocked_dates(
        &self,
        _agent_id: &str,
        _range_start: NaiveDate,
        _range_end: NaiveDate,
    ) -> BoxFuture<'_, BTreeSet<NaiveDate>, Self::Error> {
        Box::pin(async { Err(BoxedError(Box::from("manual block source down"))) })
    }
}

pub(crate) struct StaticDirectory {
    pub agents: Vec<String>,
    pub listings: Vec<String>,
}

impl ListingDirectoryService for StaticDirectory {
    type Error = BoxedError;

    fn listing_exists(&self, listing_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let ok = self.listings.iter().any(|l| l == listing_id);
        Box::pin(async move { Ok(ok) })
    }

    fn agent_exists(&self, agent_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let ok = self.agents.iter().any(|a| a == agent_id);
        Box::pin(async move { Ok(ok) })
    }
}

pub(crate) struct FailingDirectory;

impl ListingDirectoryService for FailingDirectory {
    type Error = BoxedError;

    fn listing_exists(&self, _listing_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async { Err(BoxedError(Box::from("directory down"))) })
    }

    fn agent_exists(&self, _agent_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async { Err(BoxedError(Box::from("directory down"))) })
    }
}

pub(crate) struct StaticIdentity(pub Option<UserProfile>);

impl IdentityService for StaticIdentity {
    type Error = BoxedError;

    fn current_user(&self) -> BoxFuture<'_, Option<UserProfile>, Self::Error> {
        let user = self.0.clone();
        Box::pin(async move { Ok(user) })
    }
}

// --- Wired-up core ---

pub(crate) struct SchedulingHarness {
    pub repository: Arc<InMemoryAppointmentRepository>,
    pub registry: Arc<BlockedDateRegistry>,
    pub booking: BookingService,
    pub reschedule: RescheduleService,
    pub cancellation: CancellationService,
}

pub(crate) fn harness() -> SchedulingHarness {
    harness_with(None, None, None)
}

pub(crate) fn harness_with(
    manual_blocks: Option<Arc<dyn ManualBlockService<Error = BoxedError>>>,
    directory: Option<Arc<dyn ListingDirectoryService<Error = BoxedError>>>,
    identity: Option<Arc<dyn IdentityService<Error = BoxedError>>>,
) -> SchedulingHarness {
    let config = test_config();
    let repository = Arc::new(InMemoryAppointmentRepository::new());
    let dyn_repository: Arc<dyn AppointmentRepository> = repository.clone();
    let grid = Arc::new(SlotGrid::from_config(&config.scheduling).expect("default grid"));
    let registry = Arc::new(BlockedDateRegistry::new(
        dyn_repository.clone(),
        manual_blocks,
    ));
    let booking = BookingService::new(
        config.clone(),
        grid.clone(),
        registry.clone(),
        dyn_repository.clone(),
        directory,
        identity,
    );
    let reschedule = RescheduleService::new(
        config.clone(),
        grid.clone(),
        registry.clone(),
        dyn_repository.clone(),
    );
    let cancellation = CancellationService::new(dyn_repository);
    SchedulingHarness {
        repository,
        registry,
        booking,
        reschedule,
        cancellation,
    }
}
