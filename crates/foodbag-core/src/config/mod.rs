//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to its defaults when absent.

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod database;
pub mod logging;
pub mod reaper;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::bootstrap::BootstrapConfig;
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::reaper::ReaperConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Expired food bag sweeper settings.
    #[serde(default)]
    pub reaper: ReaperConfig,
    /// Startup data seeding.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `FOODBAG__`
    /// (e.g. `FOODBAG__AUTH__JWT_SECRET`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FOODBAG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Configuration suited to in-process tests: memory store, no reaper timer,
    /// no admin seeding, fast operation timeouts.
    pub fn for_tests() -> Self {
        let mut config = Self::default();
        config.database.provider = StoreProvider::Memory;
        config.database.operation_timeout_seconds = 5;
        config.reaper.enabled = false;
        config.bootstrap.seed_admin = false;
        config.auth.jwt_secret = "test-secret-do-not-use".to_string();
        config
    }
}
