//! Projection configuration.

use serde::{Deserialize, Serialize};

use crate::{GeoCoordinate, SceneError, SceneResult};

/// Default scene centre (Whitechapel, London) as (lon, lat).
pub const DEFAULT_CENTER: (f64, f64) = (-0.0668529, 51.5127414);

/// Default zoom level.
pub const DEFAULT_ZOOM: u32 = 15;

/// Default pixel size of a single map tile.
pub const DEFAULT_TILE_SIZE: u32 = 128;

/// Highest zoom level accepted; beyond this the scale leaves the range where
/// f64 keeps sub-millimetre precision.
pub const MAX_ZOOM: u32 = 30;

/// Parameters of the local planar projection.
///
/// Passed explicitly into every projection call. A new value may be built per
/// call or reused; there is no hidden state either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Geographic point that projects to the origin
    pub center: GeoCoordinate,
    /// Zoom level
    pub zoom: u32,
    /// Tile size in pixels
    pub tile_size: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            center: GeoCoordinate::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl ProjectionConfig {
    pub fn new(center: GeoCoordinate, zoom: u32, tile_size: u32) -> Self {
        Self {
            center,
            zoom,
            tile_size,
        }
    }

    /// Same zoom and tile size, different centre.
    pub fn with_center(self, center: GeoCoordinate) -> Self {
        Self { center, ..self }
    }

    /// Projection scale: `tile_size * 2^zoom`, applied to radians.
    pub fn scale(&self) -> f64 {
        self.tile_size as f64 * 2f64.powi(self.zoom as i32)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SceneResult<()> {
        if self.tile_size == 0 {
            return Err(SceneError::config("tile_size", "must be > 0"));
        }
        if self.zoom > MAX_ZOOM {
            return Err(SceneError::config(
                "zoom",
                format!("must be <= {}, got {}", MAX_ZOOM, self.zoom),
            ));
        }
        self.center.validate()
    }
}
