//! API error handling
//!
//! Denials are not errors: they are answered with a 200 and `allowed: false`.
//! `ApiError` covers requests that cannot be evaluated at all. In production
//! messages that look like they carry file paths or panics are redacted and
//! internal details are withheld.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

const REDACTED: &str = "An error occurred processing your request";

/// Substrings that mark a message as unsafe to show outside development
const LEAK_MARKERS: &[&str] = &[
    "/home/",
    "/users/",
    "/var/",
    "/etc/",
    "c:\\",
    ".toml",
    ".rs:",
    "panicked at",
    "stack backtrace",
];

static DETAILED_ERRORS: AtomicBool = AtomicBool::new(true);

/// Whether responses may carry unredacted messages and internal details
///
/// The server turns this off in production.
pub fn set_expose_internal_errors(expose: bool) {
    DETAILED_ERRORS.store(expose, Ordering::Relaxed);
}

fn detailed() -> bool {
    DETAILED_ERRORS.load(Ordering::Relaxed)
}

fn public_message(msg: &str) -> Cow<'_, str> {
    if detailed() {
        return Cow::Borrowed(msg);
    }
    let lower = msg.to_lowercase();
    if LEAK_MARKERS.iter().any(|marker| lower.contains(marker)) {
        Cow::Borrowed(REDACTED)
    } else {
        Cow::Borrowed(msg)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request is well-formed JSON but cannot be evaluated
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side fault, typically unusable configuration
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code carried in [`ErrorResponse::code`]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal_error",
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, details) = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => (public_message(msg).into_owned(), None),
            Self::Internal(msg) => (
                "An internal error occurred".to_string(),
                detailed().then(|| msg.clone()),
            ),
        };
        ErrorResponse {
            error,
            code: self.code().to_string(),
            details,
        }
    }
}

/// Body of every non-2xx response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// `bad_request`, `not_found`, `internal_error` or `validation_error`
    pub code: String,
    /// Only outside production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let message = err.to_string();
        if err.is_client_error() {
            Self::BadRequest(message)
        } else {
            Self::Internal(message)
        }
    }
}
