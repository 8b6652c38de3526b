//! Policy handlers: single decisions, read scopes and visibility filtering

use axum::{Json, extract::State};
use domain::{Action, DecisionReason, Principal, QueryConstraint, Resource, ResourceKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    middleware::{RequestId, ValidatedJson},
    state::AppState,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "principal": {
        "id": "u-42",
        "role": "domain_admin",
        "organizationId": "o1",
        "domainId": "d1"
    },
    "resource": { "kind": "plot", "_id": "p7", "organizationId": "o1", "domainId": "d2" },
    "action": "delete"
}))]
pub struct AuthorizeRequest {
    #[schema(value_type = crate::openapi::PrincipalSchema)]
    pub principal: Principal,
    #[schema(value_type = crate::openapi::ResourceSchema)]
    pub resource: Resource,
    #[schema(value_type = crate::openapi::ActionSchema)]
    pub action: Action,
}

/// A decision; denials are answered with 200 as well
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorizeResponse {
    pub allowed: bool,
    /// Diagnostic reason code, e.g. `domain_mismatch`
    #[schema(value_type = String, example = "domain_mismatch")]
    pub reason: DecisionReason,
    /// True when the principal's attributes contradict its role
    pub integrity_fault: bool,
}

/// Decide whether a principal may act on a resource
#[utoipa::path(
    post,
    path = "/v1/authorize",
    tag = "policy",
    request_body = AuthorizeRequest,
    responses(
        (status = 200, description = "Decision made", body = AuthorizeResponse),
        (status = 400, description = "Malformed request", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn authorize(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<AuthorizeRequest>,
) -> Json<AuthorizeResponse> {
    let decision = state.authorization.authorize(
        &request_id.context(),
        &request.principal,
        &request.resource,
        request.action,
    );

    Json(AuthorizeResponse {
        allowed: decision.allowed,
        reason: decision.reason,
        integrity_fault: decision.is_integrity_fault(),
    })
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScopeRequest {
    #[schema(value_type = crate::openapi::PrincipalSchema)]
    pub principal: Principal,
    #[schema(value_type = crate::openapi::ResourceKindSchema)]
    pub kind: ResourceKind,
}

/// Read scope of a principal over one kind
#[derive(Debug, Serialize, ToSchema)]
pub struct ScopeResponse {
    #[schema(value_type = crate::openapi::ResourceKindSchema)]
    pub kind: ResourceKind,
    /// Compiled constraint: `unrestricted`, `nothing` or `any_of`
    #[schema(value_type = Object)]
    pub constraint: QueryConstraint,
    /// Document-store filter equivalent to `constraint`
    #[schema(value_type = Object, example = json!({ "organizationId": "o1", "domainId": "d1" }))]
    pub filter: Value,
}

/// Compile the storage filter for everything a principal may read of a kind
#[utoipa::path(
    post,
    path = "/v1/scope",
    tag = "policy",
    request_body = ScopeRequest,
    responses(
        (status = 200, description = "Scope compiled", body = ScopeResponse),
        (status = 400, description = "Malformed request", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn scope(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<ScopeRequest>,
) -> Json<ScopeResponse> {
    let report = state
        .authorization
        .scope(&request_id.context(), &request.principal, request.kind);

    Json(ScopeResponse {
        kind: report.kind,
        constraint: report.constraint,
        filter: report.filter,
    })
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VisibleRequest {
    #[schema(value_type = crate::openapi::PrincipalSchema)]
    pub principal: Principal,
    #[validate(length(max = 1000, message = "at most 1000 resources per request"))]
    #[schema(value_type = Vec<crate::openapi::ResourceSchema>)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VisibleResponse {
    /// Number of resources submitted
    pub total: usize,
    /// The readable subset, in submission order
    #[schema(value_type = Vec<crate::openapi::ResourceSchema>)]
    pub visible: Vec<Resource>,
}

/// Keep only the resources a principal may read
#[utoipa::path(
    post,
    path = "/v1/visible",
    tag = "policy",
    request_body = VisibleRequest,
    responses(
        (status = 200, description = "Resources filtered", body = VisibleResponse),
        (status = 400, description = "Malformed request", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn visible(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<VisibleRequest>,
) -> Json<VisibleResponse> {
    let visible = state
        .authorization
        .visible(&request_id.context(), &request.principal, &request.resources)
        .into_iter()
        .cloned()
        .collect();

    Json(VisibleResponse {
        total: request.resources.len(),
        visible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;
    use infrastructure::AppConfig;
    use uuid::Uuid;

    fn state() -> State<AppState> {
        State(AppState::from_config(AppConfig::default()))
    }

    fn domain_admin() -> Principal {
        Principal::new("da", Role::DomainAdmin)
            .with_organization("o1")
            .with_domain("d1")
    }

    #[tokio::test]
    async fn denial_is_a_regular_response() {
        let request = AuthorizeRequest {
            principal: domain_admin(),
            resource: Resource::new(ResourceKind::Plot)
                .with_id("p7")
                .in_organization("o1")
                .in_domain("d2"),
            action: Action::Delete,
        };

        let Json(resp) = authorize(state(), RequestId(Uuid::nil()), ValidatedJson(request)).await;
        assert!(!resp.allowed);
        assert_eq!(resp.reason, DecisionReason::DomainMismatch);
        assert!(!resp.integrity_fault);
    }

    #[tokio::test]
    async fn missing_domain_is_flagged() {
        let request = AuthorizeRequest {
            principal: Principal::new("da", Role::DomainAdmin).with_organization("o1"),
            resource: Resource::new(ResourceKind::Plot).with_id("p1").in_organization("o1"),
            action: Action::Read,
        };

        let Json(resp) = authorize(state(), RequestId(Uuid::nil()), ValidatedJson(request)).await;
        assert!(resp.integrity_fault);
        assert_eq!(resp.reason, DecisionReason::MissingDomain);
    }

    #[tokio::test]
    async fn scope_renders_filter() {
        let request = ScopeRequest {
            principal: domain_admin(),
            kind: ResourceKind::Plot,
        };

        let Json(resp) = scope(state(), RequestId(Uuid::nil()), ValidatedJson(request)).await;
        assert_eq!(
            resp.filter,
            serde_json::json!({ "organizationId": "o1", "domainId": "d1" })
        );
    }

    #[tokio::test]
    async fn visible_keeps_submission_order() {
        let request = VisibleRequest {
            principal: domain_admin(),
            resources: vec![
                Resource::new(ResourceKind::Plot).with_id("a").in_organization("o1").in_domain("d1"),
                Resource::new(ResourceKind::Plot).with_id("b").in_organization("o1").in_domain("d2"),
                Resource::new(ResourceKind::Category).with_id("c").in_organization("o1"),
            ],
        };

        let Json(resp) = visible(state(), RequestId(Uuid::nil()), ValidatedJson(request)).await;
        assert_eq!(resp.total, 3);
        let ids: Vec<_> = resp
            .visible
            .iter()
            .filter_map(|r| r.id().map(ToString::to_string))
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
