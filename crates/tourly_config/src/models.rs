// --- File: crates/tourly_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Scheduling Config ---
// Controls the booking horizon and the daily slot grid.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    /// Number of days ahead of today that remain bookable (inclusive).
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
    /// First bookable time of day, "HH:MM".
    #[serde(default = "default_day_start")]
    pub day_start: String,
    /// Last bookable time of day, "HH:MM" (inclusive).
    #[serde(default = "default_day_end")]
    pub day_end: String,
    /// Grid step in minutes.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: i64,
    /// IANA time zone used to resolve "today" on the server.
    /// Slot times themselves are calendar times, not zone-shifted.
    pub time_zone: Option<String>,
}

fn default_horizon_days() -> i64 {
    30
}
fn default_day_start() -> String {
    "09:00".to_string()
}
fn default_day_end() -> String {
    "17:00".to_string()
}
fn default_slot_minutes() -> i64 {
    30
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            day_start: default_day_start(),
            day_end: default_day_end(),
            slot_minutes: default_slot_minutes(),
            time_zone: None,
        }
    }
}

// --- Listing Directory Config ---
// Holds the base URL of the external listing/agent directory.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DirectoryConfig {
    pub base_url: String,
}

// --- Manual Blocks Config ---
// Holds the base URL of the external manual calendar-block source.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BlocksConfig {
    pub base_url: String,
}

// --- Identity Config ---
// Holds the base URL of the session/identity service used for contact prefill.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdentityConfig {
    pub base_url: String,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    #[serde(default)]
    pub server: ServerConfig,

    // Scheduling core config, always present (defaults apply field-wise)
    #[serde(default)]
    pub scheduling: SchedulingConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_directory: bool,
    #[serde(default)]
    pub use_blocks: bool,
    #[serde(default)]
    pub use_identity: bool,

    // --- Optional External Collaborator Configurations ---
    #[serde(default)]
    pub directory: Option<DirectoryConfig>,
    #[serde(default)]
    pub blocks: Option<BlocksConfig>,
    #[serde(default)]
    pub identity: Option<IdentityConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            scheduling: SchedulingConfig::default(),
            use_directory: false,
            use_blocks: false,
            use_identity: false,
            directory: None,
            blocks: None,
            identity: None,
        }
    }
}
