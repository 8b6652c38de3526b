//! Value Objects - Immutable, identity-less domain primitives

mod action;
mod entity_id;
mod geo_point;
mod resource_kind;
mod role;

pub use action::Action;
pub use entity_id::{EntityId, reference};
pub use geo_point::{CoordinateAxis, Coordinates, EARTH_RADIUS_KM, GeoPoint};
pub use resource_kind::ResourceKind;
pub use role::Role;
