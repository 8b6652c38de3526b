//! Location rules configuration.

use application::{ApplicationError, LocationRules};
use domain::geo::{DEFAULT_REGION_CENTER, DEFAULT_REGION_RADIUS_KM};
use domain::{Boundary, Coordinates, GeoPoint};
use serde::{Deserialize, Serialize};

/// Region that domain centers must lie in
///
/// ```toml
/// [placement]
/// region_latitude = 12.684582467948083
/// region_longitude = 78.0549622542717
/// region_radius_km = 4.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "default_region_latitude")]
    pub region_latitude: f64,

    #[serde(default = "default_region_longitude")]
    pub region_longitude: f64,

    #[serde(default = "default_region_radius_km")]
    pub region_radius_km: f64,
}

const fn default_region_latitude() -> f64 {
    DEFAULT_REGION_CENTER.latitude()
}

const fn default_region_longitude() -> f64 {
    DEFAULT_REGION_CENTER.longitude()
}

const fn default_region_radius_km() -> f64 {
    DEFAULT_REGION_RADIUS_KM
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            region_latitude: default_region_latitude(),
            region_longitude: default_region_longitude(),
            region_radius_km: default_region_radius_km(),
        }
    }
}

impl PlacementConfig {
    /// Validate into the rules the placement service runs with
    pub fn location_rules(&self) -> Result<LocationRules, ApplicationError> {
        let region_center =
            GeoPoint::try_from(Coordinates::new(self.region_latitude, self.region_longitude))
                .map_err(|e| ApplicationError::Configuration(format!("placement region: {e}")))?;

        if !self.region_radius_km.is_finite() || self.region_radius_km <= 0.0 {
            return Err(ApplicationError::Configuration(format!(
                "placement region radius must be positive, got {}",
                self.region_radius_km
            )));
        }

        // In range is not enough: the region must also be drawable.
        Boundary::region(region_center, self.region_radius_km)
            .map_err(|e| ApplicationError::Configuration(format!("placement region: {e}")))?;

        Ok(LocationRules {
            region_center,
            region_radius_km: self.region_radius_km,
        })
    }
}
