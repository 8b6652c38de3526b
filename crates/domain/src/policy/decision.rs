//! Authorization decision

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::PrincipalAttribute;

/// Why a decision came out the way it did
///
/// For diagnostics and tests only; never shown verbatim to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// SuperAdmin bypass
    SuperAdmin,
    /// Resource is in the principal's organization
    OrganizationScope,
    /// Resource is in the principal's organization and domain
    DomainScope,
    /// Plot is one of the principal's assignments
    AssignedPlot,
    /// Principal created the resource
    Ownership,

    /// A principal may never delete its own account
    SelfDeletion,
    /// SuperAdmin accounts can only be changed by a SuperAdmin
    SuperAdminProtected,
    /// Tier principal without an organization
    MissingOrganization,
    /// DomainAdmin or ApplicationUser without a domain
    MissingDomain,
    /// ApplicationUser without any assigned plot
    MissingPlots,
    /// Resource carries no organization and is outside every tier's reach
    UnscopedResource,
    /// Resource belongs to another organization
    OrganizationMismatch,
    /// Resource is in the principal's organization but another domain
    DomainMismatch,
    /// Plot is not among the principal's assignments
    PlotNotAssigned,
    /// Principal did not create the resource
    NotOwner,
    /// The role has no grant for this kind and action
    NoMatchingGrant,
}

impl DecisionReason {
    /// Integrity reason for a principal missing a required attribute
    pub const fn missing(attribute: PrincipalAttribute) -> Self {
        match attribute {
            PrincipalAttribute::Organization => Self::MissingOrganization,
            PrincipalAttribute::Domain => Self::MissingDomain,
            PrincipalAttribute::Plots => Self::MissingPlots,
        }
    }

    /// Whether this reason signals bad upstream data rather than policy
    pub const fn is_integrity_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingOrganization | Self::MissingDomain | Self::MissingPlots
        )
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::OrganizationScope => "organization_scope",
            Self::DomainScope => "domain_scope",
            Self::AssignedPlot => "assigned_plot",
            Self::Ownership => "ownership",
            Self::SelfDeletion => "self_deletion",
            Self::SuperAdminProtected => "super_admin_protected",
            Self::MissingOrganization => "missing_organization",
            Self::MissingDomain => "missing_domain",
            Self::MissingPlots => "missing_plots",
            Self::UnscopedResource => "unscoped_resource",
            Self::OrganizationMismatch => "organization_mismatch",
            Self::DomainMismatch => "domain_mismatch",
            Self::PlotNotAssigned => "plot_not_assigned",
            Self::NotOwner => "not_owner",
            Self::NoMatchingGrant => "no_matching_grant",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of evaluating one (principal, resource, action) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl Decision {
    pub const fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    pub const fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    pub const fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub const fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Denied because the principal's attributes are inconsistent with its role
    pub const fn is_integrity_fault(&self) -> bool {
        !self.allowed && self.reason.is_integrity_fault()
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.allowed { "allow" } else { "deny" };
        write!(f, "{verdict} ({})", self.reason)
    }
}
