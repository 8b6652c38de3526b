//! Domain layer for PlotGuard
//!
//! The authorization engine, read-side scope compiler and geofenced placement
//! validator. Everything here is pure and synchronous: no I/O, no logging.

pub mod entities;
pub mod errors;
pub mod geo;
pub mod policy;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use geo::{
    Boundary, BoundaryError, BoundaryScope, BoundingBox, PlacementViolation, ValidationResult,
    validate_placement,
};
pub use policy::{
    Decision, DecisionReason, FieldConstraint, QueryConstraint, ScopeFilter, decide,
    filter_visible, scope_filter,
};
pub use value_objects::*;
