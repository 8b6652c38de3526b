//! HTTP request handlers

pub mod authorize;
pub mod boundaries;
pub mod health;
pub mod placement;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
