//! Application-level errors

use domain::{BoundaryError, DomainError};
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Authorization denials are not errors; they come back as a
/// [`domain::Decision`]. These cover input that cannot be evaluated at all.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<BoundaryError> for ApplicationError {
    fn from(err: BoundaryError) -> Self {
        Self::Domain(DomainError::from(err))
    }
}

impl ApplicationError {
    /// Whether the caller supplied bad input, as opposed to a server fault
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_errors_become_domain_errors() {
        let err = ApplicationError::from(BoundaryError::PolarCenter(89.0));
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidBoundary(_))
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::InvalidRole("farmer".into()));
        assert_eq!(err.to_string(), "Invalid role: farmer");
    }

    #[test]
    fn configuration_is_a_server_fault() {
        let err = ApplicationError::Configuration("region radius must be positive".into());
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Configuration error: region radius must be positive"
        );
    }
}
