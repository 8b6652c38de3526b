//! PlotGuard HTTP presentation layer
//!
//! Exposes the policy engine and the placement validator as a JSON API.

pub mod config_reload;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use config_reload::{ReloadableConfig, spawn_config_reload_handler};
pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
