//! Resource kind value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of entity the platform manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[serde(alias = "Organization")]
    Organization,
    #[serde(alias = "Domain")]
    Domain,
    #[serde(alias = "Plot")]
    Plot,
    #[serde(alias = "Category")]
    Category,
    #[serde(alias = "PlantType")]
    PlantType,
    #[serde(alias = "PlantVariety")]
    PlantVariety,
    #[serde(alias = "Plant")]
    Plant,
    #[serde(alias = "User")]
    User,
}

impl ResourceKind {
    pub const ALL: [Self; 8] = [
        Self::Organization,
        Self::Domain,
        Self::Plot,
        Self::Category,
        Self::PlantType,
        Self::PlantVariety,
        Self::Plant,
        Self::User,
    ];

    /// Catalog kinds are organization-wide reference data
    #[must_use]
    pub const fn is_catalog(&self) -> bool {
        matches!(self, Self::Category | Self::PlantType | Self::PlantVariety)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Domain => "domain",
            Self::Plot => "plot",
            Self::Category => "category",
            Self::PlantType => "plant_type",
            Self::PlantVariety => "plant_variety",
            Self::Plant => "plant",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = crate::errors::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized || kind.as_str().replace('_', "") == normalized)
            .ok_or_else(|| crate::errors::DomainError::InvalidResourceKind(s.to_string()))
    }
}
