//! Fixed scene furniture: lights, ground plane, camera and axis helpers.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use scene_common::{CartesianPosition, SolarAngles};

use crate::material::Material;

/// The sun: a white spot light aimed at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunLight {
    pub color: u32,
    pub position: CartesianPosition,
    /// Angles the position was derived from, once the clock has been set
    pub angles: Option<SolarAngles>,
    pub cast_shadow: bool,
    pub shadow_darkness: f64,
}

impl Default for SunLight {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            position: CartesianPosition::default(),
            angles: None,
            cast_shadow: true,
            shadow_darkness: 0.4,
        }
    }
}

/// Constant fill light so shaded walls are not black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub color: u32,
    pub intensity: f64,
    pub distance: f64,
    pub position: CartesianPosition,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 1.0,
            distance: 100.0,
            position: CartesianPosition::new(100.0, 300.0, -300.0),
        }
    }
}

/// Textured ground plane, laid flat (rotated -π/2 about X).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    pub width: f64,
    pub depth: f64,
    pub segments: u32,
    pub material: Material,
    pub rotation_x: f64,
    pub receive_shadow: bool,
}

impl GroundPlane {
    pub fn new(size: f64, texture_dir: &str) -> Self {
        Self {
            width: size,
            depth: size,
            segments: 10,
            material: Material::textured(format!(
                "{}/tarmac.jpg",
                texture_dir.trim_end_matches('/')
            )),
            rotation_x: -FRAC_PI_2,
            receive_shadow: true,
        }
    }

    /// Whether a world-space point lies over the plane.
    pub fn covers(&self, x: f64, z: f64) -> bool {
        x.abs() <= self.width / 2.0 && z.abs() <= self.depth / 2.0
    }
}

/// Initial perspective camera placement. Interactive control is left to the
/// viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub position: CartesianPosition,
    pub target: CartesianPosition,
}

impl Camera {
    /// Camera at `(0, distance, distance)` looking at the origin.
    pub fn looking_at_origin(distance: f64) -> Self {
        Self {
            fov_deg: 45.0,
            near: 0.1,
            far: 1000.0,
            position: CartesianPosition::new(0.0, distance, distance),
            target: CartesianPosition::default(),
        }
    }
}

/// A small coloured cube marking an axis direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisMarker {
    pub size: f64,
    pub position: CartesianPosition,
    pub material: Material,
}

/// Red, green and blue cubes 200 units along +X, +Y and +Z.
pub fn axis_markers() -> Vec<AxisMarker> {
    [
        (CartesianPosition::new(200.0, 0.0, 0.0), 0xff0000),
        (CartesianPosition::new(0.0, 200.0, 0.0), 0x00ff00),
        (CartesianPosition::new(0.0, 0.0, 200.0), 0x0000ff),
    ]
    .into_iter()
    .map(|(position, color)| AxisMarker {
        size: 10.0,
        position,
        material: Material::Phong { color },
    })
    .collect()
}
