//! Read-side scoping
//!
//! Listing endpoints need the set of records a principal may read, expressed
//! as a storage query rather than a per-record check. The constraint here is
//! compiled from the same [`GRANTS`](super::GRANTS) rows that drive
//! [`decide`], so a record matches the query exactly when `decide(.., Read)`
//! allows it.

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::decide;
use super::grants::grants_for;
use crate::entities::{Principal, Resource};
use crate::value_objects::{Action, EntityId, ResourceKind, Role};

/// One field-level condition on a stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "constraint", content = "value", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// `organizationId = X`
    OrganizationEquals(EntityId),
    /// `organizationId` is set
    OrganizationPresent,
    /// `domainId = D`
    DomainEquals(EntityId),
    /// `_id = D`
    IdEquals(EntityId),
    /// `_id ∈ {..}`
    IdIn(Vec<EntityId>),
    /// `createdBy = P`
    CreatedBy(EntityId),
}

impl FieldConstraint {
    /// Stored field name the constraint applies to
    pub const fn field(&self) -> &'static str {
        match self {
            Self::OrganizationEquals(_) | Self::OrganizationPresent => "organizationId",
            Self::DomainEquals(_) => "domainId",
            Self::IdEquals(_) | Self::IdIn(_) => "_id",
            Self::CreatedBy(_) => "createdBy",
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Self::OrganizationEquals(organization) => {
                resource.organization_id() == Some(organization)
            },
            Self::OrganizationPresent => resource.organization_id().is_some(),
            Self::DomainEquals(domain) => resource.domain_id() == Some(domain),
            Self::IdEquals(id) => resource.id() == Some(id),
            Self::IdIn(ids) => resource.id().is_some_and(|id| ids.contains(id)),
            Self::CreatedBy(creator) => resource.creator() == Some(creator),
        }
    }

    fn to_filter_value(&self) -> Value {
        match self {
            Self::OrganizationEquals(id)
            | Self::DomainEquals(id)
            | Self::IdEquals(id)
            | Self::CreatedBy(id) => json!(id),
            Self::OrganizationPresent => json!({ "$exists": true, "$ne": null }),
            Self::IdIn(ids) => json!({ "$in": ids }),
        }
    }
}

/// The storage-side form of "everything this principal may read"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "any_of", rename_all = "snake_case")]
pub enum QueryConstraint {
    /// No restriction (SuperAdmin)
    Unrestricted,
    /// Matches no record
    Nothing,
    /// A disjunction of conjunctions
    AnyOf(Vec<Vec<FieldConstraint>>),
}

impl QueryConstraint {
    /// Compile the read constraint for `principal` over records of `kind`
    pub fn compile(principal: &Principal, kind: ResourceKind) -> Self {
        if principal.role() == Role::SuperAdmin {
            return Self::Unrestricted;
        }
        if principal.missing_attribute().is_some() {
            return Self::Nothing;
        }

        let mut branches: Vec<Vec<FieldConstraint>> = Vec::new();
        for grant in grants_for(principal.role(), kind, Action::Read) {
            if let Some(branch) = grant.scope.field_constraints(principal, kind) {
                if !branches.contains(&branch) {
                    branches.push(branch);
                }
            }
        }

        if branches.is_empty() {
            Self::Nothing
        } else {
            Self::AnyOf(branches)
        }
    }

    pub const fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    pub fn is_nothing(&self) -> bool {
        match self {
            Self::Nothing => true,
            Self::AnyOf(branches) => branches.is_empty(),
            Self::Unrestricted => false,
        }
    }

    /// Evaluate the constraint against a descriptor in memory
    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Nothing => false,
            Self::AnyOf(branches) => branches
                .iter()
                .any(|branch| branch.iter().all(|constraint| constraint.matches(resource))),
        }
    }

    /// Render as a document-store filter
    ///
    /// ```
    /// use domain::{Principal, QueryConstraint, ResourceKind, Role};
    ///
    /// let admin = Principal::new("a", Role::OrgAdmin).with_organization("o1");
    /// let filter = QueryConstraint::compile(&admin, ResourceKind::Plot).to_filter_document();
    ///
    /// assert_eq!(filter, serde_json::json!({ "organizationId": "o1" }));
    /// ```
    pub fn to_filter_document(&self) -> Value {
        match self {
            Self::Unrestricted => json!({}),
            Self::Nothing => json!({ "_id": { "$in": [] } }),
            Self::AnyOf(branches) => match branches.as_slice() {
                [] => json!({ "_id": { "$in": [] } }),
                [branch] => conjunction(branch),
                _ => json!({ "$or": branches.iter().map(|b| conjunction(b)).collect::<Vec<_>>() }),
            },
        }
    }
}

/// One object per branch; repeated fields fall back to `$and`
fn conjunction(branch: &[FieldConstraint]) -> Value {
    let mut merged = Map::new();
    for constraint in branch {
        if merged.contains_key(constraint.field()) {
            let clauses: Vec<Value> = branch
                .iter()
                .map(|c| {
                    let mut clause = Map::new();
                    clause.insert(c.field().to_owned(), c.to_filter_value());
                    Value::Object(clause)
                })
                .collect();
            return json!({ "$and": clauses });
        }
        merged.insert(constraint.field().to_owned(), constraint.to_filter_value());
    }
    Value::Object(merged)
}

/// A principal's read scope over one resource kind
#[derive(Debug, Clone)]
pub struct ScopeFilter<'p> {
    principal: &'p Principal,
    kind: ResourceKind,
    constraint: QueryConstraint,
}

impl<'p> ScopeFilter<'p> {
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub const fn principal(&self) -> &'p Principal {
        self.principal
    }

    pub const fn constraint(&self) -> &QueryConstraint {
        &self.constraint
    }

    /// Whether the principal may read this resource
    pub fn matches(&self, resource: &Resource) -> bool {
        resource.kind() == self.kind && decide(self.principal, resource, Action::Read).allowed
    }

    /// Keep the readable resources of this filter's kind
    pub fn apply<'r>(&self, resources: &'r [Resource]) -> Vec<&'r Resource> {
        resources.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Build the read scope of `principal` over `kind`
pub fn scope_filter(principal: &Principal, kind: ResourceKind) -> ScopeFilter<'_> {
    ScopeFilter {
        principal,
        kind,
        constraint: QueryConstraint::compile(principal, kind),
    }
}

/// Keep only the resources `principal` may read, whatever their kind
pub fn filter_visible<'r>(principal: &Principal, resources: &'r [Resource]) -> Vec<&'r Resource> {
    resources
        .iter()
        .filter(|resource| decide(principal, resource, Action::Read).allowed)
        .collect()
}
