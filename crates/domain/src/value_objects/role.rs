//! Role value object
//!
//! Roles form a strict tier: SuperAdmin > OrgAdmin > DomainAdmin > ApplicationUser.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// The tier a principal acts at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator with unrestricted authority
    #[serde(alias = "SuperAdmin")]
    SuperAdmin,
    /// Administers a single organization
    #[serde(alias = "OrgAdmin")]
    OrgAdmin,
    /// Administers a single domain inside an organization
    #[serde(alias = "DomainAdmin")]
    DomainAdmin,
    /// Field user assigned to one or more plots
    #[serde(alias = "ApplicationUser")]
    ApplicationUser,
}

impl Role {
    pub const ALL: [Self; 4] = [
        Self::SuperAdmin,
        Self::OrgAdmin,
        Self::DomainAdmin,
        Self::ApplicationUser,
    ];

    /// The persisted string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::OrgAdmin => "org_admin",
            Self::DomainAdmin => "domain_admin",
            Self::ApplicationUser => "application_user",
        }
    }

    /// Whether this role must be scoped to an organization
    #[must_use]
    pub const fn requires_organization(&self) -> bool {
        !matches!(self, Self::SuperAdmin)
    }

    /// Whether this role must be scoped to a domain
    #[must_use]
    pub const fn requires_domain(&self) -> bool {
        matches!(self, Self::DomainAdmin | Self::ApplicationUser)
    }

    /// Whether this role must carry at least one assigned plot
    #[must_use]
    pub const fn requires_plots(&self) -> bool {
        matches!(self, Self::ApplicationUser)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "super_admin" | "SuperAdmin" => Ok(Self::SuperAdmin),
            "org_admin" | "OrgAdmin" => Ok(Self::OrgAdmin),
            "domain_admin" | "DomainAdmin" => Ok(Self::DomainAdmin),
            "application_user" | "ApplicationUser" => Ok(Self::ApplicationUser),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}
