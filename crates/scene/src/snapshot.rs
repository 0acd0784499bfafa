//! Serializable view of a scene.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scene_common::{GeoCoordinate, PlanarPoint, SceneResult};

use crate::building::{Building, MESH_EULER_XYZ};
use crate::material::BuildingMaterials;
use crate::mesh::MeshData;
use crate::objects::{AxisMarker, Camera, GroundPlane, PointLight, SunLight};

/// One building as written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub id: usize,
    pub levels: u32,
    pub height: f64,
    pub landmark: bool,
    pub footprint: Vec<PlanarPoint>,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub materials: BuildingMaterials,
    pub rotation: [f64; 3],
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshData>,
}

impl BuildingSnapshot {
    pub fn from_building(building: &Building, include_mesh: bool) -> Self {
        Self {
            id: building.id,
            levels: building.record.levels,
            height: building.height,
            landmark: building.record.landmark,
            footprint: building.footprint.clone(),
            vertex_count: building.mesh.vertex_count(),
            triangle_count: building.mesh.triangle_count(),
            materials: building.materials.clone(),
            rotation: MESH_EULER_XYZ,
            cast_shadow: building.cast_shadow,
            receive_shadow: building.receive_shadow,
            mesh: include_mesh.then(|| building.mesh.clone()),
        }
    }
}

/// Everything a viewer needs to draw the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub center: GeoCoordinate,
    pub zoom: u32,
    pub clock: DateTime<Utc>,
    pub sun: SunLight,
    pub fill_light: PointLight,
    pub floor: GroundPlane,
    pub camera: Camera,
    pub helpers: Vec<AxisMarker>,
    pub buildings: Vec<BuildingSnapshot>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn total_triangles(&self) -> usize {
        self.buildings.iter().map(|b| b.triangle_count).sum()
    }
}
