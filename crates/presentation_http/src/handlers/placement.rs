//! Placement handlers
//!
//! An invalid placement is a normal answer (`ok: false`); only centers that
//! cannot carry a boundary are rejected with 400.

use axum::{Json, extract::State};
use domain::{Coordinates, ValidationResult};
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{RequestId, ValidatedJson},
    state::AppState,
};

/// A plant location checked against its plot
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "point": { "latitude": 12.6975, "longitude": 78.0636 },
    "plotCenter": { "latitude": 12.6975, "longitude": 78.0616 },
    "plotSizeSqM": 10000
}))]
pub struct ValidatePlacementRequest {
    #[schema(value_type = crate::openapi::CoordinatesSchema)]
    pub point: Coordinates,
    #[schema(value_type = crate::openapi::CoordinatesSchema)]
    pub plot_center: Coordinates,
    /// Plot area; unset or non-positive means 10000 m²
    #[serde(default)]
    pub plot_size_sq_m: Option<f64>,
}

/// Check that a plant lies within its plot
#[utoipa::path(
    post,
    path = "/v1/validate-placement",
    tag = "placement",
    request_body = ValidatePlacementRequest,
    responses(
        (status = 200, description = "Placement checked", body = crate::openapi::ValidationResultSchema),
        (status = 400, description = "Unusable plot center", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn validate_placement(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<ValidatePlacementRequest>,
) -> Result<Json<ValidationResult>, ApiError> {
    let result = state.placement()?.validate_plant(
        request.point,
        request.plot_center,
        request.plot_size_sq_m,
    )?;
    Ok(Json(result))
}

/// A plot location checked against its domain
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePlotPlacementRequest {
    #[schema(value_type = crate::openapi::CoordinatesSchema)]
    pub point: Coordinates,
    #[schema(value_type = crate::openapi::CoordinatesSchema)]
    pub domain_center: Coordinates,
    /// Registered sizes of the domain's plots; `null` entries are skipped
    #[serde(default)]
    #[validate(length(max = 10000, message = "at most 10000 plot sizes"))]
    pub plot_sizes_sq_m: Vec<Option<f64>>,
}

/// Check that a plot lies within its domain
#[utoipa::path(
    post,
    path = "/v1/validate-plot-placement",
    tag = "placement",
    request_body = ValidatePlotPlacementRequest,
    responses(
        (status = 200, description = "Placement checked", body = crate::openapi::ValidationResultSchema),
        (status = 400, description = "Unusable domain center", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn validate_plot_placement(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<ValidatePlotPlacementRequest>,
) -> Result<Json<ValidationResult>, ApiError> {
    let result = state.placement()?.validate_plot(
        request.point,
        request.domain_center,
        &request.plot_sizes_sq_m,
    )?;
    Ok(Json(result))
}

/// A domain location checked against the configured region
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ValidateDomainPlacementRequest {
    #[schema(value_type = crate::openapi::CoordinatesSchema)]
    pub point: Coordinates,
}

/// Check that a domain lies within the region
#[utoipa::path(
    post,
    path = "/v1/validate-domain-placement",
    tag = "placement",
    request_body = ValidateDomainPlacementRequest,
    responses(
        (status = 200, description = "Placement checked", body = crate::openapi::ValidationResultSchema),
        (status = 500, description = "Region misconfigured", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn validate_domain_placement(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<ValidateDomainPlacementRequest>,
) -> Result<Json<ValidationResult>, ApiError> {
    let result = state.placement()?.validate_domain(request.point)?;
    Ok(Json(result))
}
