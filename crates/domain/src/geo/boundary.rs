//! Boundary construction
//!
//! Boundaries are built on demand from a center and a size and are never
//! persisted. Vertices use a local equirectangular approximation:
//!
//! ```text
//! Δlat = (r / 111.32) · cos θ
//! Δlng = (r / (111.32 · cos(lat))) · sin θ
//! ```
//!
//! which holds for boundaries from tens of meters to a few kilometers away
//! from the poles. Containment uses the haversine radius, not the polygon.

use serde::Serialize;
use std::f64::consts::{FRAC_PI_4, PI, TAU};
use thiserror::Error;

use crate::value_objects::GeoPoint;

/// Kilometers per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.32;

/// Vertex count for circles when the caller has no preference
pub const DEFAULT_CIRCLE_POINTS: usize = 32;

/// Area assumed for a plot with no registered size (100 m × 100 m)
pub const DEFAULT_PLOT_SIZE_SQ_M: f64 = 10_000.0;

/// Domain radius when none of its plots has a registered size
pub const DEFAULT_DOMAIN_RADIUS_KM: f64 = 1.0;

/// Centers beyond this latitude break the longitude scaling
pub const MAX_CENTER_LATITUDE: f64 = 85.0;

/// Reference center that domain locations are checked against
pub const DEFAULT_REGION_CENTER: GeoPoint =
    GeoPoint::new_unchecked(12.684_582_467_948_083, 78.054_962_254_271_7);

pub const DEFAULT_REGION_RADIUS_KM: f64 = 4.0;

/// Builder misuse
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BoundaryError {
    #[error("center latitude {0} is outside the supported range of -85 to 85")]
    PolarCenter(f64),

    #[error("size must be finite and non-negative, got {0}")]
    InvalidSize(f64),

    #[error("a circle needs at least 3 points, got {0}")]
    TooFewPoints(usize),
}

/// What a boundary encloses, which selects the rejection message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryScope {
    /// Area domains must lie in
    Region,
    /// Area plots must lie in
    Domain,
    /// Area plants must lie in
    Plot,
    /// Any other circle
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryShape {
    Circle {
        points: usize,
    },
    #[serde(rename_all = "camelCase")]
    Square {
        side_m: f64,
        area_sq_m: f64,
    },
}

/// South-west and north-east corners enclosing every vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// A closed polygon plus the center and radius used for containment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundary {
    scope: BoundaryScope,
    shape: BoundaryShape,
    center: GeoPoint,
    radius_km: f64,
    vertices: Vec<GeoPoint>,
}

impl Boundary {
    /// Regular polygon approximating a circle
    ///
    /// # Errors
    ///
    /// Fails for polar centers, a non-finite or negative radius, or fewer
    /// than three points.
    pub fn circle(center: GeoPoint, radius_km: f64, points: usize) -> Result<Self, BoundaryError> {
        check_center(center)?;
        check_size(radius_km)?;
        if points < 3 {
            return Err(BoundaryError::TooFewPoints(points));
        }

        let step = TAU / points as f64;
        let vertices = (0..points)
            .map(|i| offset(center, radius_km, step * i as f64))
            .collect();

        Ok(Self {
            scope: BoundaryScope::Area,
            shape: BoundaryShape::Circle { points },
            center,
            radius_km,
            vertices,
        })
    }

    /// Axis-aligned square of the given side length in meters
    ///
    /// The containment radius is the half-diagonal, so the corners are on
    /// the boundary.
    ///
    /// # Errors
    ///
    /// Fails for polar centers or a non-finite or negative side.
    pub fn square(center: GeoPoint, side_m: f64) -> Result<Self, BoundaryError> {
        check_center(center)?;
        check_size(side_m)?;

        let radius_km = side_m / 2.0 * std::f64::consts::SQRT_2 / 1000.0;
        let vertices = (0..4)
            .map(|i| offset(center, radius_km, FRAC_PI_4 + f64::from(i) * PI / 2.0))
            .collect();

        Ok(Self {
            scope: BoundaryScope::Area,
            shape: BoundaryShape::Square {
                side_m,
                area_sq_m: side_m * side_m,
            },
            center,
            radius_km,
            vertices,
        })
    }

    /// Square plot boundary from its registered area
    ///
    /// A missing or non-positive size falls back to
    /// [`DEFAULT_PLOT_SIZE_SQ_M`].
    ///
    /// # Errors
    ///
    /// Fails for polar centers or a non-finite size.
    pub fn for_plot(center: GeoPoint, size_sq_m: Option<f64>) -> Result<Self, BoundaryError> {
        let area = effective_plot_size(size_sq_m)?;
        let mut boundary = Self::square(center, area.sqrt())?;
        boundary.shape = BoundaryShape::Square {
            side_m: area.sqrt(),
            area_sq_m: area,
        };
        boundary.scope = BoundaryScope::Plot;
        Ok(boundary)
    }

    /// Circular domain boundary enclosing the combined area of its plots
    ///
    /// Radius is `sqrt(Σ size / π)` meters; [`DEFAULT_DOMAIN_RADIUS_KM`] when
    /// no plot has a positive size.
    ///
    /// # Errors
    ///
    /// Fails for polar centers or a non-finite plot size.
    pub fn for_domain(center: GeoPoint, plot_sizes_sq_m: &[Option<f64>]) -> Result<Self, BoundaryError> {
        let mut total = 0.0;
        for size in plot_sizes_sq_m.iter().flatten() {
            if !size.is_finite() {
                return Err(BoundaryError::InvalidSize(*size));
            }
            if *size > 0.0 {
                total += size;
            }
        }

        let radius_km = if total > 0.0 {
            (total / PI).sqrt() / 1000.0
        } else {
            DEFAULT_DOMAIN_RADIUS_KM
        };

        let mut boundary = Self::circle(center, radius_km, DEFAULT_CIRCLE_POINTS)?;
        boundary.scope = BoundaryScope::Domain;
        Ok(boundary)
    }

    /// Circular region that domain centers must lie in
    ///
    /// # Errors
    ///
    /// Fails for polar centers or a non-finite or negative radius.
    pub fn region(center: GeoPoint, radius_km: f64) -> Result<Self, BoundaryError> {
        let mut boundary = Self::circle(center, radius_km, DEFAULT_CIRCLE_POINTS)?;
        boundary.scope = BoundaryScope::Region;
        Ok(boundary)
    }

    pub const fn scope(&self) -> BoundaryScope {
        self.scope
    }

    pub const fn shape(&self) -> BoundaryShape {
        self.shape
    }

    pub const fn center(&self) -> GeoPoint {
        self.center
    }

    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Polygon vertices in order; the ring closes implicitly
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Vertices with the first one repeated at the end, as map layers expect
    pub fn closed_ring(&self) -> Vec<GeoPoint> {
        let mut ring = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            ring.push(*first);
        }
        ring
    }

    /// Registered plot area for square boundaries
    pub const fn area_sq_m(&self) -> Option<f64> {
        match self.shape {
            BoundaryShape::Square { area_sq_m, .. } => Some(area_sq_m),
            BoundaryShape::Circle { .. } => None,
        }
    }

    /// Haversine distance from the center is within the radius
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.center.distance_km(point) <= self.radius_km
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let init = (
            self.center.latitude(),
            self.center.longitude(),
            self.center.latitude(),
            self.center.longitude(),
        );
        let (south, west, north, east) =
            self.vertices
                .iter()
                .fold(init, |(south, west, north, east), vertex| {
                    (
                        south.min(vertex.latitude()),
                        west.min(vertex.longitude()),
                        north.max(vertex.latitude()),
                        east.max(vertex.longitude()),
                    )
                });

        BoundingBox {
            south_west: GeoPoint::new_unchecked(south, west),
            north_east: GeoPoint::new_unchecked(north, east),
        }
    }
}

fn effective_plot_size(size_sq_m: Option<f64>) -> Result<f64, BoundaryError> {
    match size_sq_m {
        Some(size) if !size.is_finite() => Err(BoundaryError::InvalidSize(size)),
        Some(size) if size > 0.0 => Ok(size),
        _ => Ok(DEFAULT_PLOT_SIZE_SQ_M),
    }
}

fn check_center(center: GeoPoint) -> Result<(), BoundaryError> {
    if center.latitude().abs() > MAX_CENTER_LATITUDE {
        return Err(BoundaryError::PolarCenter(center.latitude()));
    }
    Ok(())
}

fn check_size(size: f64) -> Result<(), BoundaryError> {
    if !size.is_finite() || size < 0.0 {
        return Err(BoundaryError::InvalidSize(size));
    }
    Ok(())
}

fn offset(center: GeoPoint, radius_km: f64, angle: f64) -> GeoPoint {
    let lat = center.latitude() + (radius_km / KM_PER_DEGREE) * angle.cos();
    let lng = center.longitude()
        + (radius_km / (KM_PER_DEGREE * center.latitude().to_radians().cos())) * angle.sin();
    GeoPoint::new_unchecked(lat, lng)
}
