//! Readiness checks
//!
//! The service has no external dependencies, so readiness means the policy
//! table is populated and the configured region yields a usable boundary.

use std::collections::BTreeMap;

use domain::policy::GRANTS;
use serde::Serialize;
use tracing::{instrument, warn};

use super::placement_service::PlacementService;

/// Status of one readiness check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckStatus {
    #[must_use]
    pub fn healthy_with_info(info: impl Into<String>) -> Self {
        Self {
            healthy: true,
            info: Some(info.into()),
            error: None,
        }
    }

    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregated readiness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// True when every check is healthy
    pub healthy: bool,
    pub checks: BTreeMap<String, CheckStatus>,
}

impl HealthReport {
    #[must_use]
    pub fn new(checks: BTreeMap<String, CheckStatus>) -> Self {
        let healthy = checks.values().all(|c| c.healthy);
        Self { healthy, checks }
    }

    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckStatus> {
        self.checks.get(name)
    }
}

#[derive(Debug, Clone)]
pub struct HealthService {
    placement: PlacementService,
}

impl HealthService {
    pub const fn new(placement: PlacementService) -> Self {
        Self { placement }
    }

    #[instrument(skip(self))]
    pub fn check_all(&self) -> HealthReport {
        let mut checks = BTreeMap::new();
        checks.insert("policy".to_string(), Self::check_policy());
        checks.insert("region".to_string(), self.check_region());
        HealthReport::new(checks)
    }

    fn check_policy() -> CheckStatus {
        if GRANTS.is_empty() {
            warn!("Grant table is empty");
            return CheckStatus::unhealthy("grant table is empty");
        }
        CheckStatus::healthy_with_info(format!("{} grants", GRANTS.len()))
    }

    fn check_region(&self) -> CheckStatus {
        match self.placement.region_boundary() {
            Ok(region) => CheckStatus::healthy_with_info(format!(
                "{:.2} km around {}",
                region.radius_km(),
                region.center()
            )),
            Err(e) => {
                warn!(error = %e, "Configured region is unusable");
                CheckStatus::unhealthy(e.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LocationRules;
    use domain::GeoPoint;

    #[test]
    fn default_configuration_is_ready() {
        let report = HealthService::new(PlacementService::default()).check_all();
        assert!(report.healthy);
        assert!(report.check("policy").is_some_and(|c| c.healthy));
        assert!(
            report
                .check("region")
                .and_then(|c| c.info.as_deref())
                .is_some_and(|info| info.starts_with("4.00 km around 12.684582"))
        );
    }

    #[test]
    fn polar_region_is_not_ready() {
        let placement = PlacementService::new(LocationRules {
            region_center: GeoPoint::new_unchecked(88.0, 0.0),
            region_radius_km: 4.0,
        });
        let report = HealthService::new(placement).check_all();
        assert!(!report.healthy);
        assert!(report.check("region").is_some_and(|c| c.error.is_some()));
    }

    #[test]
    fn report_is_healthy_only_if_all_checks_are() {
        let mut checks = BTreeMap::new();
        checks.insert("a".to_string(), CheckStatus::healthy_with_info("ok"));
        checks.insert("b".to_string(), CheckStatus::unhealthy("down"));
        assert!(!HealthReport::new(checks).healthy);
    }
}
