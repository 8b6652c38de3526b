//! GeoJSON rendering for map layers

use domain::Boundary;
use serde_json::{Value, json};

/// A `Feature` with a closed `Polygon` ring in `[longitude, latitude]` order
pub fn feature(boundary: &Boundary) -> Value {
    let ring: Vec<[f64; 2]> = boundary
        .closed_ring()
        .iter()
        .map(|point| [point.longitude(), point.latitude()])
        .collect();

    json!({
        "type": "Feature",
        "properties": {
            "scope": boundary.scope(),
            "radiusKm": boundary.radius_km(),
            "center": [boundary.center().longitude(), boundary.center().latitude()],
        },
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::GeoPoint;

    #[test]
    fn ring_is_closed_and_longitude_first() {
        let center = GeoPoint::new(12.6, 78.0).unwrap();
        let boundary = Boundary::for_plot(center, Some(10_000.0)).unwrap();

        let feature = feature(&boundary);
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();

        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
        let lng = ring[0][0].as_f64().unwrap();
        assert!((lng - 78.0).abs() < 0.01);
        assert_eq!(feature["properties"]["scope"], "plot");
    }
}
