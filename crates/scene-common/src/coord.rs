//! Geographic, planar and scene-space coordinate value types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{SceneError, SceneResult};

/// A geographic coordinate in decimal degrees.
///
/// Longitude comes first, matching GeoJSON axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
    /// Latitude in degrees, (-90, 90)
    pub lat: f64,
}

impl GeoCoordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build from a GeoJSON-style `[lon, lat]` pair.
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lon: pair[0],
            lat: pair[1],
        }
    }

    /// Check the coordinate lies on the globe.
    ///
    /// The poles themselves are rejected: the Mercator projection and the
    /// hour-angle terms of the ephemeris are singular there.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(SceneError::InvalidCoordinate(format!(
                "non-finite component in {}",
                self
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(SceneError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                self.lon
            )));
        }
        if self.lat <= -90.0 || self.lat >= 90.0 {
            return Err(SceneError::LatitudeOutOfDomain(self.lat));
        }
        Ok(())
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// A point on the local projected plane, in pixel-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A point in 3D scene space.
///
/// Scene axes: +Y up, +X east, +Z south.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_regular_coordinates() {
        assert!(GeoCoordinate::new(-0.0668529, 51.5127414).validate().is_ok());
        assert!(GeoCoordinate::new(180.0, -89.999).validate().is_ok());
        assert!(GeoCoordinate::new(-180.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_poles() {
        let err = GeoCoordinate::new(0.0, 90.0).validate().unwrap_err();
        assert!(matches!(err, SceneError::LatitudeOutOfDomain(lat) if lat == 90.0));

        let err = GeoCoordinate::new(0.0, -95.0).validate().unwrap_err();
        assert!(matches!(err, SceneError::LatitudeOutOfDomain(_)));
    }

    #[test]
    fn test_validate_rejects_bad_longitude_and_nan() {
        assert!(matches!(
            GeoCoordinate::new(181.0, 0.0).validate(),
            Err(SceneError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            GeoCoordinate::new(f64::NAN, 0.0).validate(),
            Err(SceneError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            GeoCoordinate::new(0.0, f64::INFINITY).validate(),
            Err(SceneError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_planar_distance() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_geo_coordinate_serde_roundtrip() {
        let coord = GeoCoordinate::new(-0.0668529, 51.5127414);
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, r#"{"lon":-0.0668529,"lat":51.5127414}"#);
        let back: GeoCoordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(coord, back);
    }
}
