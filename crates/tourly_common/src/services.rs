// --- File: crates/tourly_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! The scheduling core consumes an identity/session layer (contact prefill),
//! a listing/agent directory, and an agent's manual calendar-block source.
//! These traits decouple the core from the concrete backends and allow
//! in-memory implementations in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// The signed-in user as reported by the identity/session layer.
///
/// Used only to prefill client contact defaults; booking never requires a
/// session.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A trait for the identity/session layer.
pub trait IdentityService: Send + Sync {
    /// Error type returned by identity operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The currently signed-in user, if any.
    fn current_user(&self) -> BoxFuture<'_, Option<UserProfile>, Self::Error>;
}

/// A trait for the listing/agent directory.
///
/// Listings and agents are owned elsewhere; the scheduling core only needs
/// existence checks before accepting a booking.
pub trait ListingDirectoryService: Send + Sync {
    /// Error type returned by directory operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the given listing exists.
    fn listing_exists(&self, listing_id: &str) -> BoxFuture<'_, bool, Self::Error>;

    /// Whether the given agent exists.
    fn agent_exists(&self, agent_id: &str) -> BoxFuture<'_, bool, Self::Error>;
}

/// A trait for an agent's manual calendar-block source.
///
/// Manual blocks are days an agent marked unavailable independently of any
/// booking. The registry merges them with appointment-derived blocks.
pub trait ManualBlockService: Send + Sync {
    /// Error type returned by block-source operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Dates manually blocked for the agent within `[range_start, range_end]`.
    fn manual_blocked_dates(
        &self,
        agent_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> BoxFuture<'_, BTreeSet<NaiveDate>, Self::Error>;
}

/// A factory for creating service instances.
///
/// The backend implements this to hand the scheduling core whichever
/// collaborators are configured; `None` means the collaborator is absent.
pub trait ServiceFactory: Send + Sync {
    /// Get an identity service instance.
    fn identity_service(&self) -> Option<Arc<dyn IdentityService<Error = BoxedError>>>;

    /// Get a listing directory service instance.
    fn directory_service(&self) -> Option<Arc<dyn ListingDirectoryService<Error = BoxedError>>>;

    /// Get a manual block source instance.
    fn manual_block_service(&self) -> Option<Arc<dyn ManualBlockService<Error = BoxedError>>>;
}
