//! Infrastructure layer - Configuration and logging
//!
//! Loads layered configuration and installs the tracing subscriber. The
//! policy service keeps no state, so there are no persistence adapters.

pub mod config;
pub mod telemetry;

pub use config::{AppConfig, ENV_PREFIX, Environment, PlacementConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
