//! Placement Service - geofence checks for plants, plots and domains
//!
//! Each level of the hierarchy is checked against the boundary of its
//! parent: plants against their plot, plots against their domain, domains
//! against the configured region.

use domain::geo::{DEFAULT_REGION_CENTER, DEFAULT_REGION_RADIUS_KM};
use domain::{Boundary, Coordinates, DomainError, GeoPoint, ValidationResult, validate_placement};
use tracing::{debug, instrument};

use crate::error::ApplicationError;

/// Location rules that are not derived from stored data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRules {
    /// Reference point domain centers are measured from
    pub region_center: GeoPoint,
    /// Maximum distance of a domain center from `region_center`
    pub region_radius_km: f64,
}

impl Default for LocationRules {
    fn default() -> Self {
        Self {
            region_center: DEFAULT_REGION_CENTER,
            region_radius_km: DEFAULT_REGION_RADIUS_KM,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlacementService {
    rules: LocationRules,
}

impl PlacementService {
    pub const fn new(rules: LocationRules) -> Self {
        Self { rules }
    }

    pub const fn rules(&self) -> &LocationRules {
        &self.rules
    }

    /// Square boundary of a plot
    pub fn plot_boundary(
        &self,
        center: Coordinates,
        size_sq_m: Option<f64>,
    ) -> Result<Boundary, ApplicationError> {
        Ok(Boundary::for_plot(parse_center(center)?, size_sq_m)?)
    }

    /// Circular boundary of a domain sized by its plots
    pub fn domain_boundary(
        &self,
        center: Coordinates,
        plot_sizes_sq_m: &[Option<f64>],
    ) -> Result<Boundary, ApplicationError> {
        Ok(Boundary::for_domain(parse_center(center)?, plot_sizes_sq_m)?)
    }

    /// The configured region
    pub fn region_boundary(&self) -> Result<Boundary, ApplicationError> {
        Ok(Boundary::region(
            self.rules.region_center,
            self.rules.region_radius_km,
        )?)
    }

    /// Check a plant's location against its plot
    #[instrument(skip(self))]
    pub fn validate_plant(
        &self,
        point: Coordinates,
        plot_center: Coordinates,
        plot_size_sq_m: Option<f64>,
    ) -> Result<ValidationResult, ApplicationError> {
        let boundary = self.plot_boundary(plot_center, plot_size_sq_m)?;
        Ok(check(point, &boundary))
    }

    /// Check a plot's location against its domain
    #[instrument(skip(self, plot_sizes_sq_m), fields(plots = plot_sizes_sq_m.len()))]
    pub fn validate_plot(
        &self,
        point: Coordinates,
        domain_center: Coordinates,
        plot_sizes_sq_m: &[Option<f64>],
    ) -> Result<ValidationResult, ApplicationError> {
        let boundary = self.domain_boundary(domain_center, plot_sizes_sq_m)?;
        Ok(check(point, &boundary))
    }

    /// Check a domain's location against the region
    #[instrument(skip(self))]
    pub fn validate_domain(&self, point: Coordinates) -> Result<ValidationResult, ApplicationError> {
        let boundary = self.region_boundary()?;
        Ok(check(point, &boundary))
    }
}

fn parse_center(center: Coordinates) -> Result<GeoPoint, DomainError> {
    GeoPoint::try_from(center)
}

fn check(point: Coordinates, boundary: &Boundary) -> ValidationResult {
    let result = validate_placement(point, boundary);
    debug!(
        ok = result.ok,
        distance_km = ?result.distance_km,
        max_distance_km = result.max_distance_km,
        scope = ?boundary.scope(),
        "Placement checked"
    );
    result
}
