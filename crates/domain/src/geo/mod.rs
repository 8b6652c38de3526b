//! Geofenced placement: nested boundaries and containment checks

mod boundary;
mod placement;

pub use boundary::{
    Boundary, BoundaryError, BoundaryScope, BoundaryShape, BoundingBox, DEFAULT_CIRCLE_POINTS,
    DEFAULT_DOMAIN_RADIUS_KM, DEFAULT_PLOT_SIZE_SQ_M, DEFAULT_REGION_CENTER,
    DEFAULT_REGION_RADIUS_KM, KM_PER_DEGREE, MAX_CENTER_LATITUDE,
};
pub use placement::{PlacementViolation, ValidationResult, rejection_message, validate_placement};
