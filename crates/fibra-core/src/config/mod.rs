//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod maintenance;
pub mod notifications;
pub mod server;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::maintenance::MaintenanceConfig;
use self::notifications::NotificationConfig;
use self::server::ServerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FibraConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Notification fan-out and email relay settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Background maintenance throttling settings.
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres://...).
    pub url: String,
    /// Maximum pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum idle connections kept open.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Timeout in seconds when acquiring a connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle timeout in seconds before a connection is closed.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl FibraConfig {
    /// Load configuration by merging `config/default.toml`, the
    /// environment-specific overlay, and `FIBRA__`-prefixed environment
    /// variables (double underscore as section separator).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FIBRA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}
