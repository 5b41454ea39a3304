//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `INVENTORY_INSIGHTS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use inventory_insights::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod analytics;
mod error;
mod server;
mod storage;

pub use analytics::AnalyticsConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageConfig, SummarySinkKind};

use serde::Deserialize;

/// Legacy variable naming the reports directory; the prefixed setting wins.
const LEGACY_REPORTS_PATH_VAR: &str = "INVENTORY_REPORTS_PATH";

/// Root application configuration
///
/// Every section has defaults, so the service starts with no environment at all.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Analytics thresholds and rules
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Summary persistence
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `INVENTORY_INSIGHTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `INVENTORY_INSIGHTS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `INVENTORY_INSIGHTS__ANALYTICS__ABC_A_THRESHOLD=0.7` -> `analytics.abc_a_threshold = 0.7`
    /// - `INVENTORY_REPORTS_PATH=/srv/reports` -> default for `storage.reports_path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(path) = std::env::var(LEGACY_REPORTS_PATH_VAR) {
            builder = builder.set_default("storage.reports_path", path)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("INVENTORY_INSIGHTS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.analytics.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
