//! Application layer - Use cases and orchestration
//!
//! Wraps the pure domain policy and placement logic in services that carry
//! request correlation and emit tracing events. The domain itself never logs.

pub mod error;
pub mod request_context;
pub mod services;

pub use error::ApplicationError;
pub use request_context::RequestContext;
pub use services::*;
