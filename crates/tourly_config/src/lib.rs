pub mod models;

pub use models::{
    AppConfig, BlocksConfig, DirectoryConfig, IdentityConfig, SchedulingConfig, ServerConfig,
};

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;
use tracing::debug;

static DOTENV_INIT: Once = Once::new();

/// Loads `.env` into the process environment exactly once.
/// Dependent crates call this so they do not need to care whether a
/// dotenv file is present.
pub fn ensure_dotenv_loaded() {
    DOTENV_INIT.call_once(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment overrides from .env");
        }
    });
}

/// Loads the unified application configuration.
///
/// Layered sources, later entries win:
/// 1. `config/default.*` (optional file)
/// 2. `config/{RUN_ENV}.*` (optional file, e.g. `config/production.yml`)
/// 3. Environment variables prefixed with `APP`, `__` as section separator
///    (e.g. `APP_SERVER__PORT=9000`, `APP_SCHEDULING__HORIZON_DAYS=14`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}
