//! Placement validation
//!
//! Checks that a candidate point lies inside a boundary. Bad input yields an
//! invalid result with a user-facing message, never an error.

use serde::Serialize;

use super::boundary::{Boundary, BoundaryScope, DEFAULT_PLOT_SIZE_SQ_M};
use crate::value_objects::{CoordinateAxis, Coordinates, GeoPoint};

/// Why a placement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementViolation {
    /// The raw coordinates are not a point on Earth
    OutOfRange { axis: CoordinateAxis },
    /// Farther from the center than the boundary radius
    OutsideBoundary,
}

/// Outcome of a placement check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub ok: bool,
    /// Absent when the coordinates were out of range
    pub distance_km: Option<f64>,
    pub max_distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<PlacementViolation>,
}

impl ValidationResult {
    pub const fn is_ok(&self) -> bool {
        self.ok
    }
}

/// Validate that `candidate` lies within `boundary`
///
/// ```
/// use domain::{Boundary, Coordinates, GeoPoint, validate_placement};
///
/// let center = GeoPoint::new(12.6975, 78.0616)?;
/// let plot = Boundary::for_plot(center, Some(10_000.0))?;
///
/// assert!(validate_placement(Coordinates::new(12.6975, 78.0616), &plot).ok);
/// assert!(!validate_placement(Coordinates::new(91.0, 10.0), &plot).ok);
/// # Ok::<(), domain::DomainError>(())
/// ```
pub fn validate_placement(candidate: Coordinates, boundary: &Boundary) -> ValidationResult {
    let max_distance_km = boundary.radius_km();

    if let Some(axis) = candidate.out_of_range_axis() {
        return ValidationResult {
            ok: false,
            distance_km: None,
            max_distance_km,
            message: Some(axis.range_message().to_owned()),
            violation: Some(PlacementViolation::OutOfRange { axis }),
        };
    }

    let point = GeoPoint::new_unchecked(candidate.latitude, candidate.longitude);
    let distance_km = boundary.center().distance_km(&point);

    if distance_km <= max_distance_km {
        ValidationResult {
            ok: true,
            distance_km: Some(distance_km),
            max_distance_km,
            message: None,
            violation: None,
        }
    } else {
        ValidationResult {
            ok: false,
            distance_km: Some(distance_km),
            max_distance_km,
            message: Some(rejection_message(boundary, distance_km)),
            violation: Some(PlacementViolation::OutsideBoundary),
        }
    }
}

/// Stable rejection text for a point `distance_km` from the boundary center
pub fn rejection_message(boundary: &Boundary, distance_km: f64) -> String {
    let max = boundary.radius_km();
    match boundary.scope() {
        BoundaryScope::Plot => {
            let size = boundary.area_sq_m().unwrap_or(DEFAULT_PLOT_SIZE_SQ_M);
            format!(
                "Plant must be placed within the plot boundaries. Plot size: {size}m², \
                 maximum distance from center: {max:.2} km. Current distance: {distance_km:.2} km"
            )
        },
        BoundaryScope::Domain => format!(
            "Plot must be within domain boundary ({max:.2} km radius). Current distance: {distance_km:.2} km"
        ),
        BoundaryScope::Region => format!(
            "Domain must be within {max:.2} km of the region center. Current distance: {distance_km:.2} km"
        ),
        BoundaryScope::Area => {
            format!("Location must be within {max:.2} km. Current distance: {distance_km:.2} km")
        },
    }
}
