//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coordinates", into = "Coordinates")]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Which coordinate of a raw pair is out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateAxis {
    Latitude,
    Longitude,
}

impl CoordinateAxis {
    /// User-facing range message for this axis
    pub const fn range_message(self) -> &'static str {
        match self {
            Self::Latitude => "Latitude must be between -90 and 90",
            Self::Longitude => "Longitude must be between -180 and 180",
        }
    }
}

/// An unvalidated latitude/longitude pair as supplied by a map picker or form
///
/// Accepts `lat`/`lng` as aliases so click payloads deserialize directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// First axis that falls outside its valid range (NaN is out of range)
    pub fn out_of_range_axis(&self) -> Option<CoordinateAxis> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            Some(CoordinateAxis::Latitude)
        } else if !(-180.0..=180.0).contains(&self.longitude) {
            Some(CoordinateAxis::Longitude)
        } else {
            None
        }
    }
}

impl TryFrom<Coordinates> for GeoPoint {
    type Error = DomainError;

    fn try_from(value: Coordinates) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

impl From<GeoPoint> for Coordinates {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.latitude, point.longitude)
    }
}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let raw = Coordinates::new(latitude, longitude);
        if let Some(axis) = raw.out_of_range_axis() {
            return Err(DomainError::InvalidCoordinates(axis.range_message().to_string()));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point in kilometers
    ///
    /// Uses the haversine formula, which stays accurate at short range and
    /// does not suffer from longitude compression away from the equator.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        // Rounding can push `a` a hair past 1.0 for antipodal points
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let point = GeoPoint::new(12.6975, 78.0616).expect("valid coordinates");
        assert!((point.latitude() - 12.6975).abs() < f64::EPSILON);
        assert!((point.longitude() - 78.0616).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        let err = GeoPoint::new(91.0, 10.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid coordinates: Latitude must be between -90 and 90"
        );
        assert!(GeoPoint::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_nan_is_out_of_range() {
        assert_eq!(
            Coordinates::new(f64::NAN, 0.0).out_of_range_axis(),
            Some(CoordinateAxis::Latitude)
        );
        assert_eq!(
            Coordinates::new(0.0, f64::NAN).out_of_range_axis(),
            Some(CoordinateAxis::Longitude)
        );
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(12.6975, 78.0616).expect("valid");
        assert_eq!(point.to_string(), "12.697500, 78.061600");
    }

    #[test]
    fn test_distance_same_point() {
        let point = GeoPoint::new_unchecked(12.6975, 78.0616);
        assert!(point.distance_km(&point).abs() < 1e-9);
    }

    #[test]
    fn test_distance_berlin_london() {
        let berlin = GeoPoint::new_unchecked(52.52, 13.405);
        let london = GeoPoint::new_unchecked(51.5074, -0.1278);
        let distance = berlin.distance_km(&london);
        // Berlin to London is approximately 930km
        assert!((distance - 930.0).abs() < 50.0);
    }

    #[test]
    fn test_distance_antipodal_is_half_circumference() {
        let a = GeoPoint::new_unchecked(0.0, 0.0);
        let b = GeoPoint::new_unchecked(0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((a.distance_km(&b) - half).abs() < 1e-6);
    }

    #[test]
    fn test_deserialize_accepts_short_names() {
        let point: GeoPoint = serde_json::from_str(r#"{"lat": 12.5, "lng": 78.1}"#).expect("parse");
        assert!((point.latitude() - 12.5).abs() < f64::EPSILON);
        assert!((point.longitude() - 78.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let result: Result<GeoPoint, _> =
            serde_json::from_str(r#"{"latitude": 91.0, "longitude": 10.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_uses_long_names() {
        let point = GeoPoint::new(12.5, 78.1).expect("valid");
        let json = serde_json::to_string(&point).expect("serialize");
        assert!(json.contains("\"latitude\":12.5"));
        assert!(json.contains("\"longitude\":78.1"));
    }
}
