//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml`, then `PLOTGUARD_*` environment variables. Nested keys use a
//! double underscore, e.g. `PLOTGUARD_SERVER__PORT=8080` or
//! `PLOTGUARD_PLACEMENT__REGION_RADIUS_KM=6`.
//!
//! - `server`: HTTP server settings
//! - `placement`: region the domain check measures against

mod placement;
mod server;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub use placement::PlacementConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "PLOTGUARD";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls whether internal error details reach API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details are exposed
    #[default]
    Development,
    /// Production environment - error details are sanitized
    Production,
}

impl Environment {
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    /// `RUST_LOG`-style filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub placement: PlacementConfig,
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_filter: default_log_filter(),
            server: ServerConfig::default(),
            placement: PlacementConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `config.toml` in the working directory (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load from an explicit file, which must exist, plus the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(file)
            // Override with environment variables (e.g., PLOTGUARD_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Logging setup derived from this configuration
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_filter: self.log_filter.clone(),
            log_format: self.server.log_format,
        }
    }

    /// Render as TOML, the format `config.toml` is written in
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
