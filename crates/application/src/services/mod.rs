//! Application services - Use case implementations

mod authorization_service;
mod health_service;
mod placement_service;

pub use authorization_service::{AuthorizationService, ScopeReport};
pub use health_service::{CheckStatus, HealthReport, HealthService};
pub use placement_service::{LocationRules, PlacementService};
