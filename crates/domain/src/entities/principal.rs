//! Principal entity
//!
//! The authenticated actor whose permissions are being evaluated. Built fresh
//! per request from session attributes and discarded after the decision.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::value_objects::{EntityId, Role, reference};

/// A required principal attribute, named when a principal violates its role's invariants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalAttribute {
    Organization,
    Domain,
    Plots,
}

/// Who is asking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PrincipalRecord")]
pub struct Principal {
    id: EntityId,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain_id: Option<EntityId>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    plot_ids: BTreeSet<EntityId>,
}

impl Principal {
    /// Create a principal with no tenancy scope
    #[must_use]
    pub fn new(id: impl Into<EntityId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            organization_id: None,
            domain_id: None,
            plot_ids: BTreeSet::new(),
        }
    }

    /// Shorthand for a platform-wide administrator
    #[must_use]
    pub fn super_admin(id: impl Into<EntityId>) -> Self {
        Self::new(id, Role::SuperAdmin)
    }

    #[must_use]
    pub fn with_organization(mut self, organization_id: impl Into<EntityId>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain_id: impl Into<EntityId>) -> Self {
        self.domain_id = Some(domain_id.into());
        self
    }

    #[must_use]
    pub fn with_plots<I, T>(mut self, plot_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        self.plot_ids.extend(plot_ids.into_iter().map(Into::into));
        self
    }

    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    pub const fn role(&self) -> Role {
        self.role
    }

    pub const fn organization_id(&self) -> Option<&EntityId> {
        self.organization_id.as_ref()
    }

    pub const fn domain_id(&self) -> Option<&EntityId> {
        self.domain_id.as_ref()
    }

    pub const fn plot_ids(&self) -> &BTreeSet<EntityId> {
        &self.plot_ids
    }

    /// Whether the given plot is one of this principal's assignments
    pub fn is_assigned_to(&self, plot_id: &EntityId) -> bool {
        self.plot_ids.contains(plot_id)
    }

    /// The first attribute the role requires but this principal lacks
    ///
    /// A `Some` here is an upstream data-integrity problem, not a policy outcome.
    pub fn missing_attribute(&self) -> Option<PrincipalAttribute> {
        if self.role.requires_organization() && self.organization_id.is_none() {
            Some(PrincipalAttribute::Organization)
        } else if self.role.requires_domain() && self.domain_id.is_none() {
            Some(PrincipalAttribute::Domain)
        } else if self.role.requires_plots() && self.plot_ids.is_empty() {
            Some(PrincipalAttribute::Plots)
        } else {
            None
        }
    }
}

/// Session attributes as the identity provider supplies them
///
/// Older accounts carry a single `plotId`; it is folded into `plotIds`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrincipalRecord {
    #[serde(alias = "_id")]
    id: EntityId,
    role: Role,
    #[serde(default, deserialize_with = "reference::optional")]
    organization_id: Option<EntityId>,
    #[serde(default, deserialize_with = "reference::optional")]
    domain_id: Option<EntityId>,
    #[serde(default, deserialize_with = "reference::set")]
    plot_ids: BTreeSet<EntityId>,
    #[serde(default, deserialize_with = "reference::optional")]
    plot_id: Option<EntityId>,
}

impl From<PrincipalRecord> for Principal {
    fn from(record: PrincipalRecord) -> Self {
        let mut plot_ids = record.plot_ids;
        plot_ids.extend(record.plot_id);
        Self {
            id: record.id,
            role: record.role,
            organization_id: record.organization_id,
            domain_id: record.domain_id,
            plot_ids,
        }
    }
}
