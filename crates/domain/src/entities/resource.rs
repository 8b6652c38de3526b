//! Resource descriptor
//!
//! A pure description of the entity an action targets, derived by the caller
//! from a persisted record. Descriptors carry no behavior of their own.

use serde::{Deserialize, Serialize};

use crate::value_objects::{EntityId, ResourceKind, Role, reference};

/// What is being acted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    kind: ResourceKind,
    /// Absent for resources that do not exist yet (Create)
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "reference::optional",
        skip_serializing_if = "Option::is_none"
    )]
    id: Option<EntityId>,
    #[serde(
        default,
        deserialize_with = "reference::optional",
        skip_serializing_if = "Option::is_none"
    )]
    organization_id: Option<EntityId>,
    #[serde(
        default,
        deserialize_with = "reference::optional",
        skip_serializing_if = "Option::is_none"
    )]
    domain_id: Option<EntityId>,
    #[serde(
        default,
        deserialize_with = "reference::optional",
        skip_serializing_if = "Option::is_none"
    )]
    created_by: Option<EntityId>,
    /// Role of a `User` resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

impl Resource {
    /// Create an unscoped descriptor of the given kind
    #[must_use]
    pub const fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            id: None,
            organization_id: None,
            domain_id: None,
            created_by: None,
            role: None,
        }
    }

    /// Descriptor for a user account
    #[must_use]
    pub fn user(id: impl Into<EntityId>, role: Role) -> Self {
        Self::new(ResourceKind::User).with_id(id).with_role(role)
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn in_organization(mut self, organization_id: impl Into<EntityId>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    #[must_use]
    pub fn in_domain(mut self, domain_id: impl Into<EntityId>) -> Self {
        self.domain_id = Some(domain_id.into());
        self
    }

    #[must_use]
    pub fn created_by(mut self, principal_id: impl Into<EntityId>) -> Self {
        self.created_by = Some(principal_id.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub const fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    pub const fn organization_id(&self) -> Option<&EntityId> {
        self.organization_id.as_ref()
    }

    pub const fn domain_id(&self) -> Option<&EntityId> {
        self.domain_id.as_ref()
    }

    pub const fn creator(&self) -> Option<&EntityId> {
        self.created_by.as_ref()
    }

    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// The domain this resource lives in
    ///
    /// A domain is its own scope, so for `Domain` descriptors this is the id.
    pub const fn domain_scope(&self) -> Option<&EntityId> {
        match self.kind {
            ResourceKind::Domain => self.id.as_ref(),
            _ => self.domain_id.as_ref(),
        }
    }

    /// Whether this descriptor names the given principal's own account
    pub fn is_account_of(&self, principal_id: &EntityId) -> bool {
        self.kind == ResourceKind::User && self.id.as_ref() == Some(principal_id)
    }
}
