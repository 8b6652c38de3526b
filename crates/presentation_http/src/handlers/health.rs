//! Liveness and readiness

use std::collections::BTreeMap;

use application::{CheckStatus, HealthReport};
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::state::AppState;

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Is the process up?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is running", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Can the process answer policy and placement requests?
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "All checks passed", body = crate::openapi::ReadinessSchema),
        (status = 503, description = "A check failed", body = crate::openapi::ReadinessSchema)
    )
)]
#[instrument(skip(state))]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = match state.health() {
        Ok(health) => health.check_all(),
        Err(e) => {
            warn!(error = %e, "Placement rules are unusable");
            let mut checks = BTreeMap::new();
            checks.insert("region".to_string(), CheckStatus::unhealthy(e.to_string()));
            HealthReport::new(checks)
        },
    };

    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure::AppConfig;

    #[tokio::test]
    async fn liveness_reports_crate_version() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn default_config_is_ready() {
        let state = AppState::from_config(AppConfig::default());
        let (status, Json(report)) = readiness_check(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(report.check("policy").is_some_and(|c| c.healthy));
        assert!(report.check("region").is_some_and(|c| c.healthy));
    }

    #[tokio::test]
    async fn unusable_region_is_not_ready() {
        let mut config = AppConfig::default();
        config.placement.region_radius_km = 0.0;
        let state = AppState::from_config(config);

        let (status, Json(report)) = readiness_check(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!report.healthy);
    }
}
