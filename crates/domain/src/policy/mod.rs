//! Hierarchical authorization policy
//!
//! One grant table feeds both the per-record [`decide`] and the read-side
//! [`scope_filter`] / [`QueryConstraint`].

mod decision;
mod engine;
mod grants;
mod scope;

pub use decision::{Decision, DecisionReason};
pub use engine::decide;
pub use grants::{GRANTS, Grant, Scope, grants_for};
pub use scope::{FieldConstraint, QueryConstraint, ScopeFilter, filter_visible, scope_filter};
