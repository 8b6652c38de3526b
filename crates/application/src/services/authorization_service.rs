//! Authorization Service - decision, scope and visibility use cases

use domain::{
    Action, Decision, Principal, QueryConstraint, Resource, ResourceKind, decide, filter_visible,
    scope_filter,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::request_context::RequestContext;

/// Compiled read scope for one resource kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeReport {
    pub kind: ResourceKind,
    pub constraint: QueryConstraint,
    /// Document-store rendering of `constraint`
    pub filter: Value,
}

/// Stateless front for the policy engine
///
/// Adds correlation and logging around [`decide`]; the decision itself is
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationService;

impl AuthorizationService {
    pub const fn new() -> Self {
        Self
    }

    /// Decide a single (principal, resource, action) triple
    #[instrument(
        skip_all,
        fields(
            request_id = %ctx.request_id(),
            principal = %principal.id(),
            role = %principal.role(),
            kind = %resource.kind(),
            action = %action
        )
    )]
    pub fn authorize(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        resource: &Resource,
        action: Action,
    ) -> Decision {
        let decision = decide(principal, resource, action);

        if decision.is_integrity_fault() {
            warn!(
                reason = %decision.reason,
                "Principal attributes are inconsistent with its role"
            );
        } else {
            debug!(allowed = decision.allowed, reason = %decision.reason, "Decision made");
        }

        decision
    }

    /// Compile the read scope of `principal` over `kind`
    #[instrument(
        skip_all,
        fields(request_id = %ctx.request_id(), principal = %principal.id(), kind = %kind)
    )]
    pub fn scope(&self, ctx: &RequestContext, principal: &Principal, kind: ResourceKind) -> ScopeReport {
        let filter = scope_filter(principal, kind);
        let constraint = filter.constraint().clone();

        if constraint.is_nothing() {
            debug!("Principal can read nothing of this kind");
        }

        ScopeReport {
            kind,
            filter: constraint.to_filter_document(),
            constraint,
        }
    }

    /// Keep only the resources the principal may read
    #[instrument(
        skip_all,
        fields(request_id = %ctx.request_id(), principal = %principal.id(), total = resources.len())
    )]
    pub fn visible<'r>(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        resources: &'r [Resource],
    ) -> Vec<&'r Resource> {
        let visible = filter_visible(principal, resources);
        debug!(visible = visible.len(), "Filtered resources");
        visible
    }
}
