//! Geographic bounding boxes of building footprints.

use serde::{Deserialize, Serialize};

use crate::GeoCoordinate;

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Smallest box containing every coordinate. `None` for an empty input.
    pub fn from_coordinates<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoCoordinate>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.lon, first.lat, first.lon, first.lat);
        for coord in iter {
            bounds.extend(coord);
        }
        Some(bounds)
    }

    /// Grow the box to include a coordinate.
    pub fn extend(&mut self, coord: &GeoCoordinate) {
        self.min_lon = self.min_lon.min(coord.lon);
        self.min_lat = self.min_lat.min(coord.lat);
        self.max_lon = self.max_lon.max(coord.lon);
        self.max_lat = self.max_lat.max(coord.lat);
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &GeoBounds) -> GeoBounds {
        GeoBounds {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Centre point, used to auto-centre a scene on its buildings.
    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Check if a coordinate is contained within this box.
    pub fn contains(&self, coord: &GeoCoordinate) -> bool {
        coord.lon >= self.min_lon
            && coord.lon <= self.max_lon
            && coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
    }
}
