//! Entity identifier value object
//!
//! Identity attributes reach the engine in two shapes: a bare id string, or a
//! "populated" record where the referenced document was expanded inline
//! (`{"_id": "...", "name": "..."}`). Both normalize to the same
//! [`EntityId`], so comparisons are plain string equality.
//!
//! # Examples
//!
//! ```
//! use domain::EntityId;
//!
//! let bare: EntityId = serde_json::from_str(r#""64f1c0a2""#).unwrap();
//! let populated: EntityId =
//!     serde_json::from_str(r#"{"_id": "64f1c0a2", "name": "Sunrise Farms"}"#).unwrap();
//! assert_eq!(bare, populated);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder strings that upstream query layers send instead of an absent id
const ABSENT_MARKERS: [&str; 2] = ["null", "undefined"];

/// A canonical, normalized entity identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(String);

impl EntityId {
    /// Parse an identifier, returning `None` for empty or placeholder values
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::EntityId;
    ///
    /// assert_eq!(EntityId::parse(" org-1 ").unwrap().as_str(), "org-1");
    /// assert!(EntityId::parse("").is_none());
    /// assert!(EntityId::parse("undefined").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || ABSENT_MARKERS.contains(&trimmed) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    /// Wrap a trusted identifier without placeholder filtering
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The wire shapes an identity reference can take
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    /// `"64f1c0a2"`
    Bare(String),
    /// Extended JSON object id: `{"$oid": "64f1c0a2"}`
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
    /// Populated document: `{"_id": ..., "name": ...}`
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: Box<RawReference>,
    },
}

impl RawReference {
    fn normalize(self) -> Option<EntityId> {
        match self {
            Self::Bare(raw) | Self::ObjectId { oid: raw } => EntityId::parse(&raw),
            Self::Populated { id } => id.normalize(),
        }
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawReference::deserialize(deserializer)?
            .normalize()
            .ok_or_else(|| serde::de::Error::custom("identifier must not be empty"))
    }
}

/// Serde helpers for optional and list-valued references
///
/// Missing, `null`, empty and placeholder references all collapse to `None`.
pub mod reference {
    use std::collections::BTreeSet;

    use serde::{Deserialize, Deserializer};

    use super::{EntityId, RawReference};

    /// Deserialize an optional reference in either shape
    pub fn optional<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawReference>::deserialize(deserializer)?;
        Ok(raw.and_then(RawReference::normalize))
    }

    /// Deserialize a list of references, dropping entries that normalize to nothing
    pub fn set<'de, D>(deserializer: D) -> Result<BTreeSet<EntityId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Vec<RawReference>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(RawReference::normalize)
            .collect())
    }
}
