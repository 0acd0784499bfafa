//! Scene configuration loading.
//!
//! Defaults, then an optional YAML file, then `SCENE_*` environment variables.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use scene::SceneConfig;

/// Load a scene configuration from a YAML file.
pub fn load_yaml(path: &Path) -> Result<SceneConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: SceneConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    debug!(path = %path.display(), "Loaded scene config");
    Ok(config)
}

/// Resolve the effective configuration and validate it.
pub fn load_scene_config(path: Option<&Path>) -> Result<SceneConfig> {
    let config = match path {
        Some(path) => load_yaml(path)?.with_env_overrides(),
        None => SceneConfig::from_env(),
    };
    config.validate().context("Invalid scene configuration")?;

    info!(
        center_lon = config.center_lon,
        center_lat = config.center_lat,
        zoom = config.zoom,
        tile_size = config.tile_size,
        seed = ?config.material_seed,
        "Scene configuration resolved"
    );
    Ok(config)
}
