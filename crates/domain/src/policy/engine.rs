//! The authorization engine
//!
//! `decide` is pure and total: malformed or inconsistent input resolves to a
//! denial with a diagnostic reason, never to an error or a panic.

use super::decision::{Decision, DecisionReason};
use super::grants::grants_for;
use crate::entities::{Principal, Resource};
use crate::value_objects::{Action, ResourceKind, Role};

/// Decide whether `principal` may perform `action` on `resource`
///
/// Guards run in a fixed order before the grant table is consulted:
///
/// 1. nobody deletes their own account
/// 2. SuperAdmin is allowed everything else
/// 3. SuperAdmin accounts cannot be updated or deleted from a lower tier
/// 4. a principal missing a role-required attribute is denied as an integrity fault
/// 5. a resource without an organization is outside every tier
///
/// # Examples
///
/// ```
/// use domain::{Action, Principal, Resource, ResourceKind, Role, decide};
///
/// let admin = Principal::new("u1", Role::OrgAdmin).with_organization("o1");
/// let plot = Resource::new(ResourceKind::Plot).with_id("p1").in_organization("o1");
///
/// assert!(decide(&admin, &plot, Action::Delete).allowed);
/// ```
pub fn decide(principal: &Principal, resource: &Resource, action: Action) -> Decision {
    // Ahead of the SuperAdmin allow: no principal may delete its own account.
    if action == Action::Delete && resource.is_account_of(principal.id()) {
        return Decision::deny(DecisionReason::SelfDeletion);
    }

    if principal.role() == Role::SuperAdmin {
        return Decision::allow(DecisionReason::SuperAdmin);
    }

    if resource.kind() == ResourceKind::User
        && resource.role() == Some(Role::SuperAdmin)
        && matches!(action, Action::Update | Action::Delete)
    {
        return Decision::deny(DecisionReason::SuperAdminProtected);
    }

    if let Some(missing) = principal.missing_attribute() {
        return Decision::deny(DecisionReason::missing(missing));
    }

    if resource.organization_id().is_none() {
        return Decision::deny(DecisionReason::UnscopedResource);
    }

    evaluate_grants(principal, resource, action)
}

/// First grant whose scope holds wins; otherwise report the first scope failure
fn evaluate_grants(principal: &Principal, resource: &Resource, action: Action) -> Decision {
    let mut first_denial = None;

    for grant in grants_for(principal.role(), resource.kind(), action) {
        match grant.scope.evaluate(principal, resource) {
            Ok(reason) => return Decision::allow(reason),
            Err(reason) => {
                first_denial.get_or_insert(reason);
            },
        }
    }

    Decision::deny(first_denial.unwrap_or(DecisionReason::NoMatchingGrant))
}
