//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, middleware::RequestIdLayer, openapi, state::AppState};

/// Create the main router with all routes
///
/// Carries the request-id layer and the JSON body limit from the current
/// configuration. CORS and access logging are added by the binary.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.load().server.max_body_size_json_bytes;

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/openapi.json", get(openapi::openapi_json))
        // Policy API (v1)
        .route("/v1/authorize", post(handlers::authorize::authorize))
        .route("/v1/scope", post(handlers::authorize::scope))
        .route("/v1/visible", post(handlers::authorize::visible))
        // Placement API (v1)
        .route(
            "/v1/validate-placement",
            post(handlers::placement::validate_placement),
        )
        .route(
            "/v1/validate-plot-placement",
            post(handlers::placement::validate_plot_placement),
        )
        .route(
            "/v1/validate-domain-placement",
            post(handlers::placement::validate_domain_placement),
        )
        // Boundary API (v1)
        .route(
            "/v1/boundaries/plot",
            post(handlers::boundaries::plot_boundary),
        )
        .route(
            "/v1/boundaries/domain",
            post(handlers::boundaries::domain_boundary),
        )
        .route(
            "/v1/boundaries/region",
            get(handlers::boundaries::region_boundary),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestIdLayer::new())
        .with_state(state)
}
