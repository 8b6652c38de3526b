//! Domain-level errors
//!
//! Authorization and placement never surface errors: they resolve malformed
//! input into a denial or an invalid result. These errors cover parsing of
//! raw attributes and misuse of the boundary builders.

use thiserror::Error;

use crate::geo::BoundaryError;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Coordinate outside the valid latitude/longitude range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Unknown role string
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Unknown resource kind string
    #[error("Invalid resource kind: {0}")]
    InvalidResourceKind(String),

    /// Boundary parameters outside the approximation's valid range
    #[error("Invalid boundary: {0}")]
    InvalidBoundary(#[from] BoundaryError),
}
