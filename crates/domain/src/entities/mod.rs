//! Domain entities - descriptors of the parties to an authorization decision

mod principal;
mod resource;

pub use principal::{Principal, PrincipalAttribute};
pub use resource::Resource;
