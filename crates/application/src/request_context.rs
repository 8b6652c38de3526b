//! Request context for correlating decisions with the request that asked
//!
//! Created by the HTTP layer from the `X-Request-Id` header (or freshly by
//! the CLI) and threaded into service calls so every tracing event carries
//! the same id.
//!
//! # Examples
//!
//! ```
//! use application::RequestContext;
//!
//! let ctx = RequestContext::new();
//! assert!(!ctx.request_id().is_nil());
//! ```

use std::time::{Duration, Instant};

use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    request_id: Uuid,
    received_at: Instant,
}

impl RequestContext {
    /// Create a context with a fresh time-ordered request id
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(Uuid::now_v7())
    }

    /// Create a context for a request id supplied upstream
    ///
    /// ```
    /// use application::RequestContext;
    /// use uuid::Uuid;
    ///
    /// let id = Uuid::new_v4();
    /// assert_eq!(RequestContext::with_request_id(id).request_id(), id);
    /// ```
    #[must_use]
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self {
            request_id,
            received_at: Instant::now(),
        }
    }

    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Time since the request was received
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
