// --- File: crates/services/tourly_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds whichever external collaborators are enabled in configuration and
//! hands them to the scheduling core through the `ServiceFactory` trait.
//! A disabled collaborator is simply absent; the core treats absence as
//! "no such source" rather than an error.

use std::sync::Arc;
use tourly_common::services::{
    BoxedError, IdentityService, ListingDirectoryService, ManualBlockService, ServiceFactory,
};
use tourly_config::AppConfig;
use tracing::info;

use crate::services::{HttpIdentityService, HttpListingDirectoryService, HttpManualBlockService};

pub struct TourlyServiceFactory {
    identity_service: Option<Arc<dyn IdentityService<Error = BoxedError>>>,
    directory_service: Option<Arc<dyn ListingDirectoryService<Error = BoxedError>>>,
    manual_block_service: Option<Arc<dyn ManualBlockService<Error = BoxedError>>>,
}

impl TourlyServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let identity_service: Option<Arc<dyn IdentityService<Error = BoxedError>>> =
            match (config.use_identity, config.identity.as_ref()) {
                (true, Some(identity)) => {
                    info!(base_url = %identity.base_url, "Initializing identity service client");
                    Some(Arc::new(HttpIdentityService::new(identity.base_url.clone())))
                }
                _ => None,
            };

        let directory_service: Option<Arc<dyn ListingDirectoryService<Error = BoxedError>>> =
            match (config.use_directory, config.directory.as_ref()) {
                (true, Some(directory)) => {
                    info!(base_url = %directory.base_url, "Initializing listing directory client");
                    Some(Arc::new(HttpListingDirectoryService::new(
                        directory.base_url.clone(),
                    )))
                }
                _ => None,
            };

        let manual_block_service: Option<Arc<dyn ManualBlockService<Error = BoxedError>>> =
            match (config.use_blocks, config.blocks.as_ref()) {
                (true, Some(blocks)) => {
                    info!(base_url = %blocks.base_url, "Initializing manual block source client");
                    Some(Arc::new(HttpManualBlockService::new(
                        blocks.base_url.clone(),
                    )))
                }
                _ => None,
            };

        Self {
            identity_service,
            directory_service,
            manual_block_service,
        }
    }
}

impl ServiceFactory for TourlyServiceFactory {
    fn identity_service(&self) -> Option<Arc<dyn IdentityService<Error = BoxedError>>> {
        self.identity_service.clone()
    }

    fn directory_service(&self) -> Option<Arc<dyn ListingDirectoryService<Error = BoxedError>>> {
        self.directory_service.clone()
    }

    fn manual_block_service(&self) -> Option<Arc<dyn ManualBlockService<Error = BoxedError>>> {
        self.manual_block_service.clone()
    }
}
