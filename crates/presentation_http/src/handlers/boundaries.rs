//! Boundary polygons for the map picker

use axum::{Json, extract::State};
use domain::{Boundary, BoundingBox, Coordinates};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{RequestId, ValidatedJson},
    state::AppState,
};

/// A boundary and the viewport that fits it
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryResponse {
    #[schema(value_type = crate::openapi::BoundarySchema)]
    pub boundary: Boundary,
    #[schema(value_type = Object)]
    pub bounding_box: BoundingBox,
}

impl From<Boundary> for BoundaryResponse {
    fn from(boundary: Boundary) -> Self {
        Self {
            bounding_box: boundary.bounding_box(),
            boundary,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlotBoundaryRequest {
    #[schema(value_type = crate::openapi::CoordinatesSchema)]
    pub center: Coordinates,
    #[serde(default)]
    pub size_sq_m: Option<f64>,
}

/// Square outline of a plot
#[utoipa::path(
    post,
    path = "/v1/boundaries/plot",
    tag = "boundaries",
    request_body = PlotBoundaryRequest,
    responses(
        (status = 200, description = "Boundary built", body = BoundaryResponse),
        (status = 400, description = "Unusable center", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn plot_boundary(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<PlotBoundaryRequest>,
) -> Result<Json<BoundaryResponse>, ApiError> {
    let boundary = state
        .placement()?
        .plot_boundary(request.center, request.size_sq_m)?;
    Ok(Json(boundary.into()))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainBoundaryRequest {
    #[schema(value_type = crate::openapi::CoordinatesSchema)]
    pub center: Coordinates,
    #[serde(default)]
    #[validate(length(max = 10000, message = "at most 10000 plot sizes"))]
    pub plot_sizes_sq_m: Vec<Option<f64>>,
}

/// Circular outline of a domain sized by its plots
#[utoipa::path(
    post,
    path = "/v1/boundaries/domain",
    tag = "boundaries",
    request_body = DomainBoundaryRequest,
    responses(
        (status = 200, description = "Boundary built", body = BoundaryResponse),
        (status = 400, description = "Unusable center", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn domain_boundary(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(request): ValidatedJson<DomainBoundaryRequest>,
) -> Result<Json<BoundaryResponse>, ApiError> {
    let boundary = state
        .placement()?
        .domain_boundary(request.center, &request.plot_sizes_sq_m)?;
    Ok(Json(boundary.into()))
}

/// The configured region domains must lie in
#[utoipa::path(
    get,
    path = "/v1/boundaries/region",
    tag = "boundaries",
    responses(
        (status = 200, description = "Boundary built", body = BoundaryResponse),
        (status = 500, description = "Region misconfigured", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn region_boundary(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Result<Json<BoundaryResponse>, ApiError> {
    let boundary = state.placement()?.region_boundary()?;
    Ok(Json(boundary.into()))
}
