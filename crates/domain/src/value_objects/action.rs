//! Action value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation a principal wants to perform on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[serde(alias = "Create")]
    Create,
    #[serde(alias = "Read")]
    Read,
    #[serde(alias = "Update")]
    Update,
    #[serde(alias = "Delete")]
    Delete,
}

impl Action {
    pub const ALL: [Self; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Create, Update and Delete change state
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Read)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
