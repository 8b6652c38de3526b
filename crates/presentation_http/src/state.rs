//! Application state shared across handlers

use application::{AuthorizationService, HealthService, PlacementService};
use infrastructure::AppConfig;

use crate::{config_reload::ReloadableConfig, error::ApiError};

/// Shared application state
///
/// The services are stateless; placement rules are read from the current
/// configuration so a SIGHUP reload takes effect on the next request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub authorization: AuthorizationService,
    pub config: ReloadableConfig,
}

impl AppState {
    pub fn new(config: ReloadableConfig) -> Self {
        Self {
            authorization: AuthorizationService::new(),
            config,
        }
    }

    /// State over a fixed configuration, without a reload handler
    pub fn from_config(config: AppConfig) -> Self {
        Self::new(ReloadableConfig::new(config))
    }

    /// Placement service for the configured region
    pub fn placement(&self) -> Result<PlacementService, ApiError> {
        let rules = self.config.load().placement.location_rules()?;
        Ok(PlacementService::new(rules))
    }

    pub fn health(&self) -> Result<HealthService, ApiError> {
        self.placement().map(HealthService::new)
    }
}
