//! The tier grant table
//!
//! Every permission a non-SuperAdmin role holds is one row here. Both
//! [`decide`](super::decide) and the read-side [`QueryConstraint`](super::QueryConstraint)
//! compiler walk this table, so list visibility and per-record checks cannot drift apart.

use serde::Serialize;

use super::decision::DecisionReason;
use super::scope::FieldConstraint;
use crate::entities::{Principal, Resource};
use crate::value_objects::{Action, ResourceKind, Role};

use Action::{Create, Delete, Read, Update};
use ResourceKind::{Category, Domain, Organization, Plant, PlantType, PlantVariety, Plot, User};

const ALL_ACTIONS: &[Action] = &[Create, Read, Update, Delete];
const CATALOG: &[ResourceKind] = &[Category, PlantType, PlantVariety];
const CATALOG_AND_PLANTS: &[ResourceKind] = &[Category, PlantType, PlantVariety, Plant];

/// The condition a resource must meet for a grant to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Same organization as the principal
    Organization,
    /// Same organization and same domain as the principal
    Domain,
    /// The resource is one of the principal's assigned plots
    AssignedPlot,
    /// Same organization, and the principal created the resource
    Owned,
}

impl Scope {
    /// Check the scope condition, yielding the allow or deny reason
    pub(crate) fn evaluate(
        self,
        principal: &Principal,
        resource: &Resource,
    ) -> Result<DecisionReason, DecisionReason> {
        match self {
            Self::Organization => {
                same_organization(principal, resource)?;
                Ok(DecisionReason::OrganizationScope)
            },
            Self::Domain => {
                same_organization(principal, resource)?;
                match (principal.domain_id(), resource.domain_scope()) {
                    (Some(mine), Some(theirs)) if mine == theirs => Ok(DecisionReason::DomainScope),
                    _ => Err(DecisionReason::DomainMismatch),
                }
            },
            Self::AssignedPlot => match resource.id() {
                Some(plot) if principal.is_assigned_to(plot) => Ok(DecisionReason::AssignedPlot),
                _ => Err(DecisionReason::PlotNotAssigned),
            },
            Self::Owned => {
                same_organization(principal, resource)?;
                if resource.creator() == Some(principal.id()) {
                    Ok(DecisionReason::Ownership)
                } else {
                    Err(DecisionReason::NotOwner)
                }
            },
        }
    }

    /// The storage-side equivalent of [`Scope::evaluate`] for one resource kind
    ///
    /// Returns `None` when the principal lacks the attribute the scope keys on,
    /// in which case the grant can match nothing.
    pub(crate) fn field_constraints(
        self,
        principal: &Principal,
        kind: ResourceKind,
    ) -> Option<Vec<FieldConstraint>> {
        let organization = || {
            principal
                .organization_id()
                .cloned()
                .map(FieldConstraint::OrganizationEquals)
        };
        let constraints = match self {
            Self::Organization => vec![organization()?],
            Self::Domain => {
                let domain = principal.domain_id()?.clone();
                let domain = if kind == Domain {
                    FieldConstraint::IdEquals(domain)
                } else {
                    FieldConstraint::DomainEquals(domain)
                };
                vec![organization()?, domain]
            },
            Self::AssignedPlot => vec![
                FieldConstraint::OrganizationPresent,
                FieldConstraint::IdIn(principal.plot_ids().iter().cloned().collect()),
            ],
            Self::Owned => vec![
                organization()?,
                FieldConstraint::CreatedBy(principal.id().clone()),
            ],
        };
        Some(constraints)
    }
}

fn same_organization(principal: &Principal, resource: &Resource) -> Result<(), DecisionReason> {
    match (principal.organization_id(), resource.organization_id()) {
        (Some(mine), Some(theirs)) if mine == theirs => Ok(()),
        _ => Err(DecisionReason::OrganizationMismatch),
    }
}

/// One row of the policy: `role` may perform `actions` on `kinds` within `scope`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grant {
    pub role: Role,
    pub kinds: &'static [ResourceKind],
    pub actions: &'static [Action],
    pub scope: Scope,
}

impl Grant {
    pub fn covers(&self, role: Role, kind: ResourceKind, action: Action) -> bool {
        self.role == role && self.kinds.contains(&kind) && self.actions.contains(&action)
    }
}

/// The complete grant table, in evaluation order
///
/// SuperAdmin holds no rows; it is allowed before the table is consulted.
pub static GRANTS: &[Grant] = &[
    // OrgAdmin: everything inside the organization, but cannot delete it
    Grant {
        role: Role::OrgAdmin,
        kinds: &[Organization],
        actions: &[Create, Read, Update],
        scope: Scope::Organization,
    },
    Grant {
        role: Role::OrgAdmin,
        kinds: &[Domain, Plot, Category, PlantType, PlantVariety, Plant, User],
        actions: ALL_ACTIONS,
        scope: Scope::Organization,
    },
    // DomainAdmin: hierarchy inside the domain, catalog across the organization
    Grant {
        role: Role::DomainAdmin,
        kinds: &[Organization],
        actions: &[Read],
        scope: Scope::Organization,
    },
    Grant {
        role: Role::DomainAdmin,
        kinds: &[Domain, Plot, Plant, User],
        actions: ALL_ACTIONS,
        scope: Scope::Domain,
    },
    Grant {
        role: Role::DomainAdmin,
        kinds: CATALOG,
        actions: ALL_ACTIONS,
        scope: Scope::Organization,
    },
    // ApplicationUser: authorship, not hierarchy, gates mutation
    Grant {
        role: Role::ApplicationUser,
        kinds: &[Plot],
        actions: &[Read],
        scope: Scope::AssignedPlot,
    },
    Grant {
        role: Role::ApplicationUser,
        kinds: CATALOG_AND_PLANTS,
        actions: &[Read],
        scope: Scope::Organization,
    },
    Grant {
        role: Role::ApplicationUser,
        kinds: CATALOG_AND_PLANTS,
        actions: &[Create],
        scope: Scope::Organization,
    },
    Grant {
        role: Role::ApplicationUser,
        kinds: CATALOG_AND_PLANTS,
        actions: &[Update, Delete],
        scope: Scope::Owned,
    },
];

/// Rows of the table applying to a role, kind and action, in order
pub fn grants_for(
    role: Role,
    kind: ResourceKind,
    action: Action,
) -> impl Iterator<Item = &'static Grant> {
    GRANTS
        .iter()
        .filter(move |grant| grant.covers(role, kind, action))
}
