//! Configuration for the scene.

use serde::{Deserialize, Serialize};

use scene_common::config::{DEFAULT_CENTER, DEFAULT_TILE_SIZE, DEFAULT_ZOOM};
use scene_common::{GeoCoordinate, ProjectionConfig, SceneError, SceneResult};

/// Configuration for the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Longitude of the scene centre.
    pub center_lon: f64,

    /// Latitude of the scene centre.
    pub center_lat: f64,

    /// Projection zoom level.
    pub zoom: u32,

    /// Projection tile size in pixels.
    pub tile_size: u32,

    /// Distance of the sun light from the origin.
    pub sun_distance: f64,

    /// Extrusion height of a single building level.
    pub level_height: f64,

    /// Initial camera distance along +Y and +Z.
    pub camera_distance: f64,

    /// Side length of the square ground plane.
    pub floor_size: f64,

    /// Directory holding roof, wall and ground textures.
    pub texture_dir: String,

    /// Seed for material selection. Random when unset.
    pub material_seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            center_lon: DEFAULT_CENTER.0,
            center_lat: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
            tile_size: DEFAULT_TILE_SIZE,
            sun_distance: solar::SUN_DISTANCE,
            level_height: 5.0,
            camera_distance: 100.0,
            floor_size: 300.0,
            texture_dir: "assets/img/textures".to_string(),
            material_seed: None,
        }
    }
}

impl SceneConfig {
    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides to this configuration.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("SCENE_CENTER_LON") {
            if let Ok(lon) = val.parse() {
                self.center_lon = lon;
            }
        }

        if let Ok(val) = std::env::var("SCENE_CENTER_LAT") {
            if let Ok(lat) = val.parse() {
                self.center_lat = lat;
            }
        }

        if let Ok(val) = std::env::var("SCENE_ZOOM") {
            if let Ok(zoom) = val.parse() {
                self.zoom = zoom;
            }
        }

        if let Ok(val) = std::env::var("SCENE_TILE_SIZE") {
            if let Ok(size) = val.parse() {
                self.tile_size = size;
            }
        }

        if let Ok(val) = std::env::var("SCENE_SUN_DISTANCE") {
            if let Ok(distance) = val.parse() {
                self.sun_distance = distance;
            }
        }

        if let Ok(val) = std::env::var("SCENE_LEVEL_HEIGHT") {
            if let Ok(height) = val.parse() {
                self.level_height = height;
            }
        }

        if let Ok(val) = std::env::var("SCENE_TEXTURE_DIR") {
            self.texture_dir = val;
        }

        if let Ok(val) = std::env::var("SCENE_MATERIAL_SEED") {
            if let Ok(seed) = val.parse() {
                self.material_seed = Some(seed);
            }
        }

        self
    }

    /// The scene centre.
    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.center_lon, self.center_lat)
    }

    /// Projection parameters for this configuration.
    pub fn projection(&self) -> ProjectionConfig {
        ProjectionConfig::new(self.center(), self.zoom, self.tile_size)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SceneResult<()> {
        self.projection().validate()?;

        for (param, value) in [
            ("sun_distance", self.sun_distance),
            ("level_height", self.level_height),
            ("camera_distance", self.camera_distance),
            ("floor_size", self.floor_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SceneError::config(
                    param,
                    format!("must be a positive number, got {}", value),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sun_distance, 300.0);
        assert_eq!(config.level_height, 5.0);
        assert_eq!(config.projection().scale(), 4_194_304.0);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let config = SceneConfig {
            level_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidConfig { ref param, .. }) if param == "level_height"
        ));

        let config = SceneConfig {
            sun_distance: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_polar_centre() {
        let config = SceneConfig {
            center_lat: 90.0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_domain_error());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SceneConfig = serde_json::from_str(r#"{"zoom": 16, "material_seed": 3}"#).unwrap();
        assert_eq!(config.zoom, 16);
        assert_eq!(config.material_seed, Some(3));
        assert_eq!(config.tile_size, 128);
        assert_eq!(config.center_lat, DEFAULT_CENTER.1);
    }

    // Tests run in parallel: every environment mutation stays in this test.
    #[test]
    fn test_env_overrides() {
        const VARS: [&str; 4] = [
            "SCENE_ZOOM",
            "SCENE_MATERIAL_SEED",
            "SCENE_LEVEL_HEIGHT",
            "SCENE_TEXTURE_DIR",
        ];

        std::env::set_var("SCENE_ZOOM", "17");
        std::env::set_var("SCENE_MATERIAL_SEED", "42");
        std::env::set_var("SCENE_LEVEL_HEIGHT", "3.5");
        std::env::set_var("SCENE_TEXTURE_DIR", "static/tex");
        let config = SceneConfig::default().with_env_overrides();
        assert_eq!(config.zoom, 17);
        assert_eq!(config.material_seed, Some(42));
        assert_eq!(config.level_height, 3.5);
        assert_eq!(config.texture_dir, "static/tex");
        assert_eq!(SceneConfig::from_env(), config);

        // Unparsable values keep whatever was there before
        std::env::set_var("SCENE_ZOOM", "fifteen");
        std::env::set_var("SCENE_MATERIAL_SEED", "-1");
        std::env::set_var("SCENE_LEVEL_HEIGHT", "tall");
        let base = SceneConfig {
            zoom: 12,
            material_seed: Some(5),
            ..Default::default()
        };
        let config = base.with_env_overrides();
        assert_eq!(config.zoom, 12);
        assert_eq!(config.material_seed, Some(5));
        assert_eq!(config.level_height, 5.0);

        for var in VARS {
            std::env::remove_var(var);
        }
        assert_eq!(SceneConfig::from_env().zoom, DEFAULT_ZOOM);
    }
}
