// --- File: crates/services/tourly_backend/src/services.rs ---
//! HTTP-backed implementations of the external collaborator traits.
//!
//! The identity layer, listing directory, and manual block source are owned
//! by other deployments; these clients speak to them over the shared
//! reqwest client. Any transport or decoding failure surfaces as an error
//! so the scheduling core can apply its own policy (fail closed for blocks,
//! `UpstreamUnavailable` for the directory).

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use tourly_common::http::client::HTTP_CLIENT;
use tourly_common::services::{
    BoxFuture, BoxedError, IdentityService, ListingDirectoryService, ManualBlockService,
    UserProfile,
};
use tourly_common::{external_service_error, TourlyError};

fn transport_error(err: reqwest::Error) -> BoxedError {
    BoxedError(Box::new(TourlyError::from(err)))
}

fn status_error(service_name: &str, status: reqwest::StatusCode) -> BoxedError {
    BoxedError(Box::new(external_service_error(
        service_name,
        format!("unexpected status {status}"),
    )))
}

// --- Identity ---

pub struct HttpIdentityService {
    base_url: String,
}

impl HttpIdentityService {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

impl IdentityService for HttpIdentityService {
    type Error = BoxedError;

    fn current_user(&self) -> BoxFuture<'_, Option<UserProfile>, Self::Error> {
        let url = format!("{}/session/me", self.base_url);
        Box::pin(async move {
            let response = HTTP_CLIENT.get(&url).send().await.map_err(transport_error)?;
            match response.status() {
                status if status.is_success() => {
                    let user: UserProfile = response.json().await.map_err(transport_error)?;
                    Ok(Some(user))
                }
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::NOT_FOUND => Ok(None),
                status => Err(status_error("identity", status)),
            }
        })
    }
}

// --- Listing directory ---

pub struct HttpListingDirectoryService {
    base_url: String,
}

impl HttpListingDirectoryService {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    async fn exists(&self, path: String) -> Result<bool, BoxedError> {
        let url = format!("{}{}", self.base_url, path);
        let response = HTTP_CLIENT.head(&url).send().await.map_err(transport_error)?;
        match response.status() {
            status if status.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => Err(status_error("listing directory", status)),
        }
    }
}

impl ListingDirectoryService for HttpListingDirectoryService {
    type Error = BoxedError;

    fn listing_exists(&self, listing_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let path = format!("/listings/{listing_id}");
        Box::pin(self.exists(path))
    }

    fn agent_exists(&self, agent_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let path = format!("/agents/{agent_id}");
        Box::pin(self.exists(path))
    }
}

// --- Manual blocks ---

#[derive(Deserialize)]
struct BlockedDatesPayload {
    dates: Vec<NaiveDate>,
}

pub struct HttpManualBlockService {
    base_url: String,
}

impl HttpManualBlockService {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

impl ManualBlockService for HttpManualBlockService {
    type Error = BoxedError;

    fn manual_blocked_dates(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> BoxFuture<'_, BTreeSet<NaiveDate>, Self::Error> {
        let url = format!(
            "{}/agents/{}/blocks?start_date={}&end_date={}",
            self.base_url, agent_id, range_start, range_end
        );
        Box::pin(async move {
            let response = HTTP_CLIENT.get(&url).send().await.map_err(transport_error)?;
            if !response.status().is_success() {
                return Err(status_error("manual block source", response.status()));
            }
            let payload: BlockedDatesPayload =
                response.json().await.map_err(transport_error)?;
            Ok(payload.dates.into_iter().collect())
        })
    }
}
