//! Building and ground materials.
//!
//! Textures are referenced by path only; loading them is up to the renderer.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Flat roof colour used for landmark buildings.
pub const LANDMARK_ROOF_COLOR: u32 = 0x00ffdd;

/// Number of texture variants for roofs and for walls.
pub const TEXTURE_VARIANTS: usize = 2;

/// A surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    /// Diffuse material sampling a repeating texture
    Textured { texture: String, anisotropy: u8 },
    /// Flat diffuse colour
    Lambert { color: u32 },
    /// Flat shiny colour, used for helpers
    Phong { color: u32 },
}

impl Material {
    /// Repeating texture with anisotropy 1.
    pub fn textured(texture: impl Into<String>) -> Self {
        Material::Textured {
            texture: texture.into(),
            anisotropy: 1,
        }
    }
}

/// The roof and wall material of one building, indexed by mesh material
/// slot (0 = caps, 1 = walls).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingMaterials {
    pub roof: Material,
    pub wall: Material,
}

impl BuildingMaterials {
    /// Material for a mesh material slot.
    pub fn slot(&self, index: usize) -> Option<&Material> {
        match index {
            crate::mesh::CAP_MATERIAL => Some(&self.roof),
            crate::mesh::WALL_MATERIAL => Some(&self.wall),
            _ => None,
        }
    }
}

/// Fixed set of visual variants buildings are drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialPalette {
    roofs: Vec<Material>,
    walls: Vec<Material>,
    landmark_roof: Material,
}

impl MaterialPalette {
    /// Standard palette: `roof1.jpg`, `roof2.jpg`, `wall1.jpg`, `wall2.jpg`
    /// under `texture_dir`.
    pub fn new(texture_dir: &str) -> Self {
        let variant = |prefix: &str, i: usize| {
            Material::textured(format!("{}/{}{}.jpg", texture_dir.trim_end_matches('/'), prefix, i))
        };
        Self {
            roofs: (1..=TEXTURE_VARIANTS).map(|i| variant("roof", i)).collect(),
            walls: (1..=TEXTURE_VARIANTS).map(|i| variant("wall", i)).collect(),
            landmark_roof: Material::Lambert {
                color: LANDMARK_ROOF_COLOR,
            },
        }
    }

    pub fn roofs(&self) -> &[Material] {
        &self.roofs
    }

    pub fn walls(&self) -> &[Material] {
        &self.walls
    }

    pub fn landmark_roof(&self) -> &Material {
        &self.landmark_roof
    }

    /// Pick a roof and a wall uniformly at random. Landmarks always get the
    /// landmark roof.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R, landmark: bool) -> BuildingMaterials {
        let roof = self.roofs[rng.gen_range(0..self.roofs.len())].clone();
        let wall = self.walls[rng.gen_range(0..self.walls.len())].clone();
        BuildingMaterials {
            roof: if landmark {
                self.landmark_roof.clone()
            } else {
                roof
            },
            wall,
        }
    }
}
