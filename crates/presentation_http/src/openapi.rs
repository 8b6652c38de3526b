//! OpenAPI document for the PlotGuard API, served at `/openapi.json`

// utoipa derive output trips this lint
#![allow(clippy::needless_for_each)]

use axum::Json;
use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PlotGuard API",
        description = "Hierarchical authorization and geofenced placement checks for farm plot management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers((url = "/", description = "Local server")),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "policy", description = "Authorization decisions and read scopes"),
        (name = "placement", description = "Geofence containment checks"),
        (name = "boundaries", description = "Boundary polygons for map display")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::authorize::authorize,
        handlers::authorize::scope,
        handlers::authorize::visible,
        handlers::placement::validate_placement,
        handlers::placement::validate_plot_placement,
        handlers::placement::validate_domain_placement,
        handlers::boundaries::plot_boundary,
        handlers::boundaries::domain_boundary,
        handlers::boundaries::region_boundary,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::authorize::AuthorizeRequest,
            handlers::authorize::AuthorizeResponse,
            handlers::authorize::ScopeRequest,
            handlers::authorize::ScopeResponse,
            handlers::authorize::VisibleRequest,
            handlers::authorize::VisibleResponse,
            handlers::placement::ValidatePlacementRequest,
            handlers::placement::ValidatePlotPlacementRequest,
            handlers::placement::ValidateDomainPlacementRequest,
            handlers::boundaries::BoundaryResponse,
            handlers::boundaries::PlotBoundaryRequest,
            handlers::boundaries::DomainBoundaryRequest,
            crate::error::ErrorResponse,
            // Inline re-definitions of domain types
            PrincipalSchema,
            ResourceSchema,
            RoleSchema,
            ResourceKindSchema,
            ActionSchema,
            CoordinatesSchema,
            ValidationResultSchema,
            BoundarySchema,
            ReadinessSchema,
            CheckStatusSchema,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Serve the generated document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Who is asking
///
/// Reference fields accept a bare id or a populated object with `_id`.
#[derive(Debug, utoipa::ToSchema)]
#[schema(example = json!({
    "id": "u-7",
    "role": "application_user",
    "organizationId": { "_id": "o1", "name": "Green Valley" },
    "domainId": "d1",
    "plotIds": ["p1", "p2"]
}))]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct PrincipalSchema {
    /// Also accepted as `_id`
    id: String,
    role: RoleSchema,
    organization_id: Option<String>,
    domain_id: Option<String>,
    plot_ids: Option<Vec<String>>,
}

/// What is acted on
#[derive(Debug, utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ResourceSchema {
    kind: ResourceKindSchema,
    /// Also accepted as `_id`; absent for Create
    id: Option<String>,
    organization_id: Option<String>,
    domain_id: Option<String>,
    created_by: Option<String>,
    /// Role of a `user` resource
    role: Option<RoleSchema>,
}

/// Roles; PascalCase names are accepted too
#[derive(Debug, utoipa::ToSchema)]
#[schema(rename_all = "snake_case")]
#[allow(dead_code)]
pub enum RoleSchema {
    SuperAdmin,
    OrgAdmin,
    DomainAdmin,
    ApplicationUser,
}

#[derive(Debug, utoipa::ToSchema)]
#[schema(rename_all = "snake_case")]
#[allow(dead_code)]
pub enum ResourceKindSchema {
    Organization,
    Domain,
    Plot,
    Category,
    PlantType,
    PlantVariety,
    Plant,
    User,
}

#[derive(Debug, utoipa::ToSchema)]
#[schema(rename_all = "snake_case")]
#[allow(dead_code)]
pub enum ActionSchema {
    Create,
    Read,
    Update,
    Delete,
}

/// A point; `lat`/`lng` are accepted as aliases
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct CoordinatesSchema {
    latitude: f64,
    longitude: f64,
}

/// Outcome of a placement check
#[derive(Debug, utoipa::ToSchema)]
#[schema(example = json!({
    "ok": false,
    "distanceKm": 0.2,
    "maxDistanceKm": 0.0707,
    "message": "Plant must be placed within the plot boundaries. Plot size: 10000m², maximum distance from center: 0.07 km. Current distance: 0.20 km",
    "violation": { "kind": "outside_boundary" }
}))]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ValidationResultSchema {
    ok: bool,
    /// Absent when the coordinates were out of range
    distance_km: Option<f64>,
    max_distance_km: f64,
    message: Option<String>,
    #[schema(value_type = Object)]
    violation: Option<String>,
}

/// Polygon plus the center and radius used for containment
#[derive(Debug, utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct BoundarySchema {
    /// `region`, `domain`, `plot` or `area`
    scope: String,
    #[schema(value_type = Object)]
    shape: String,
    center: CoordinatesSchema,
    radius_km: f64,
    vertices: Vec<CoordinatesSchema>,
}

/// Aggregated readiness checks
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct ReadinessSchema {
    /// True when every check is healthy
    healthy: bool,
    /// Keyed by check name, e.g. `policy`, `region`
    checks: std::collections::BTreeMap<String, CheckStatusSchema>,
}

#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct CheckStatusSchema {
    healthy: bool,
    info: Option<String>,
    error: Option<String>,
}
