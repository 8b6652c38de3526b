//! Integration tests for the HTTP API
#![allow(clippy::expect_used)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use infrastructure::AppConfig;
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

fn server_with(config: AppConfig) -> TestServer {
    let router = create_router(AppState::from_config(config));
    TestServer::new(router).expect("Failed to create test server")
}

fn server() -> TestServer {
    server_with(AppConfig::default())
}

fn domain_admin() -> Value {
    json!({
        "id": "u-da",
        "role": "domain_admin",
        "organizationId": "o1",
        "domainId": "d1"
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let response = server().get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn ready_lists_checks() {
    let response = server().get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["checks"]["policy"]["healthy"], true);
    assert_eq!(body["checks"]["region"]["healthy"], true);
}

#[tokio::test]
async fn ready_fails_with_broken_region() {
    let mut config = AppConfig::default();
    config.placement.region_latitude = 120.0;

    let response = server_with(config).get("/ready").await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["healthy"], false);
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn domain_admin_cannot_delete_plot_in_other_domain() {
    let response = server()
        .post("/v1/authorize")
        .json(&json!({
            "principal": domain_admin(),
            "resource": { "kind": "plot", "_id": "p9", "organizationId": "o1", "domainId": "d2" },
            "action": "delete"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "domain_mismatch");
    assert_eq!(body["integrity_fault"], false);
}

#[tokio::test]
async fn populated_references_are_normalized() {
    let response = server()
        .post("/v1/authorize")
        .json(&json!({
            "principal": {
                "_id": "u-7",
                "role": "ApplicationUser",
                "organizationId": { "_id": "o1", "name": "Green Valley" },
                "domainId": { "_id": "d1" },
                "plotIds": [{ "_id": "p1", "name": "North" }]
            },
            "resource": { "kind": "Plot", "_id": "p1", "organizationId": "o1", "domainId": "d1" },
            "action": "read"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["allowed"], true);
    assert_eq!(body["reason"], "assigned_plot");
}

#[tokio::test]
async fn super_admin_cannot_delete_itself() {
    let response = server()
        .post("/v1/authorize")
        .json(&json!({
            "principal": { "id": "root", "role": "super_admin" },
            "resource": { "kind": "user", "_id": "root", "role": "super_admin" },
            "action": "delete"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "self_deletion");
}

#[tokio::test]
async fn misconfigured_principal_is_an_integrity_fault() {
    let response = server()
        .post("/v1/authorize")
        .json(&json!({
            "principal": { "id": "u-1", "role": "application_user", "organizationId": "o1", "domainId": "d1" },
            "resource": { "kind": "plant", "_id": "x", "organizationId": "o1" },
            "action": "read"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "missing_plots");
    assert_eq!(body["integrity_fault"], true);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let response = server()
        .post("/v1/authorize")
        .content_type("application/json")
        .bytes("{\"principal\": ".into())
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn unknown_role_is_bad_request() {
    let response = server()
        .post("/v1/authorize")
        .json(&json!({
            "principal": { "id": "u-1", "role": "farmer" },
            "resource": { "kind": "plot" },
            "action": "read"
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn scope_returns_document_filter() {
    let response = server()
        .post("/v1/scope")
        .json(&json!({
            "principal": {
                "id": "u-7",
                "role": "application_user",
                "organizationId": "o1",
                "domainId": "d1",
                "plotIds": ["p1", "p2"]
            },
            "kind": "plot"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["kind"], "plot");
    assert_eq!(
        body["filter"],
        json!({
            "organizationId": { "$exists": true, "$ne": null },
            "_id": { "$in": ["p1", "p2"] }
        })
    );
}

#[tokio::test]
async fn visible_filters_resources() {
    let response = server()
        .post("/v1/visible")
        .json(&json!({
            "principal": domain_admin(),
            "resources": [
                { "kind": "plot", "_id": "p1", "organizationId": "o1", "domainId": "d1" },
                { "kind": "plot", "_id": "p2", "organizationId": "o1", "domainId": "d2" },
                { "kind": "organization", "_id": "o1", "organizationId": "o1" }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 3);
    let ids: Vec<&str> = body["visible"]
        .as_array()
        .expect("visible array")
        .iter()
        .filter_map(|r| r["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["p1", "o1"]);
}

// ============================================================================
// Placement
// ============================================================================

#[tokio::test]
async fn plant_at_plot_center_is_accepted() {
    let response = server()
        .post("/v1/validate-placement")
        .json(&json!({
            "point": { "lat": 12.6975, "lng": 78.0616 },
            "plotCenter": { "latitude": 12.6975, "longitude": 78.0616 },
            "plotSizeSqM": 10000
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert!(body["distanceKm"].as_f64().expect("distance") < 1e-9);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn plant_outside_plot_gets_stable_message() {
    let east = 78.0616 + 0.2 / (111.32 * 12.6975_f64.to_radians().cos());
    let response = server()
        .post("/v1/validate-placement")
        .json(&json!({
            "point": { "latitude": 12.6975, "longitude": east },
            "plotCenter": { "latitude": 12.6975, "longitude": 78.0616 }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(
        body["message"],
        "Plant must be placed within the plot boundaries. Plot size: 10000m², \
         maximum distance from center: 0.07 km. Current distance: 0.20 km"
    );
}

#[tokio::test]
async fn out_of_range_point_has_no_distance() {
    let response = server()
        .post("/v1/validate-placement")
        .json(&json!({
            "point": { "latitude": 91.0, "longitude": 10.0 },
            "plotCenter": { "latitude": 12.6975, "longitude": 78.0616 }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert!(body["distanceKm"].is_null());
    assert_eq!(body["message"], "Latitude must be between -90 and 90");
}

#[tokio::test]
async fn plot_outside_domain_is_rejected() {
    let response = server()
        .post("/v1/validate-plot-placement")
        .json(&json!({
            "point": { "latitude": 12.72, "longitude": 78.06 },
            "domainCenter": { "latitude": 12.70, "longitude": 78.06 },
            "plotSizesSqM": [null, 0]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["maxDistanceKm"], 1.0);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .starts_with("Plot must be within domain boundary (1.00 km radius)")
    );
}

#[tokio::test]
async fn domain_far_from_region_is_rejected() {
    let response = server()
        .post("/v1/validate-domain-placement")
        .json(&json!({ "point": { "latitude": 13.0, "longitude": 78.05 } }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .starts_with("Domain must be within 4.00 km of the region center")
    );
}

#[tokio::test]
async fn polar_region_is_a_server_fault() {
    let mut config = AppConfig::default();
    config.placement.region_latitude = 86.0;
    let server = server_with(config);

    let response = server
        .post("/v1/validate-domain-placement")
        .json(&json!({ "point": { "latitude": 86.0, "longitude": 78.05 } }))
        .await;
    response.assert_status_internal_server_error();
    let body: Value = response.json();
    assert_eq!(body["code"], "internal_error");

    server.get("/ready").await.assert_status_service_unavailable();
}

#[tokio::test]
async fn polar_plot_center_is_bad_request() {
    let response = server()
        .post("/v1/validate-placement")
        .json(&json!({
            "point": { "latitude": 89.0, "longitude": 0.0 },
            "plotCenter": { "latitude": 89.0, "longitude": 0.0 }
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

// ============================================================================
// Boundaries
// ============================================================================

#[tokio::test]
async fn plot_boundary_is_a_square() {
    let response = server()
        .post("/v1/boundaries/plot")
        .json(&json!({ "center": { "latitude": 12.6975, "longitude": 78.0616 }, "sizeSqM": 10000 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["boundary"]["scope"], "plot");
    assert_eq!(body["boundary"]["shape"]["type"], "square");
    assert_eq!(body["boundary"]["vertices"].as_array().map(Vec::len), Some(4));
    assert!(body["boundingBox"]["southWest"]["latitude"].is_f64());
}

#[tokio::test]
async fn domain_boundary_grows_with_plot_area() {
    let response = server()
        .post("/v1/boundaries/domain")
        .json(&json!({
            "center": { "latitude": 12.7, "longitude": 78.06 },
            "plotSizesSqM": [1000000, 2141592.65]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let radius = body["boundary"]["radiusKm"].as_f64().expect("radius");
    assert!((radius - 1.0).abs() < 1e-3);
    assert_eq!(body["boundary"]["shape"]["type"], "circle");
}

#[tokio::test]
async fn region_boundary_uses_config() {
    let mut config = AppConfig::default();
    config.placement.region_radius_km = 2.5;

    let response = server_with(config).get("/v1/boundaries/region").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["boundary"]["radiusKm"], 2.5);
}

// ============================================================================
// Cross-cutting
// ============================================================================

#[tokio::test]
async fn request_id_is_echoed() {
    let id = "0190f3c4-6d2e-7a3b-9c1d-2e3f4a5b6c7d";
    let response = server()
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let response = server().get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid_like(header.to_str().expect("ascii header")));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = server().get("/v1/nope").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = server().get("/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/v1/authorize"].is_object());
}

fn uuid_like(value: &str) -> bool {
    value.len() == 36 && value.chars().filter(|c| *c == '-').count() == 4
}
