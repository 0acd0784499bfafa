//! Buildings: footprint records turned into placed, textured meshes.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use projection::MercatorProjector;
use scene_common::{GeoCoordinate, PlanarPoint, SceneError, SceneResult};

use crate::material::BuildingMaterials;
use crate::mesh::{extrude_footprint, MeshData};

/// Euler angles (XYZ order) that stand an extruded footprint upright in the
/// scene: the extrusion axis becomes +Y.
pub const MESH_EULER_XYZ: [f64; 3] = [-FRAC_PI_2, 0.0, FRAC_PI_2];

fn default_levels() -> u32 {
    1
}

/// Input description of one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    /// Outline in geographic coordinates, closing vertex optional
    pub footprint: Vec<GeoCoordinate>,
    /// Number of storeys, at least 1
    #[serde(default = "default_levels")]
    pub levels: u32,
    /// Landmarks are drawn with the flat landmark roof
    #[serde(default)]
    pub landmark: bool,
}

impl BuildingRecord {
    pub fn new(footprint: Vec<GeoCoordinate>, levels: u32) -> Self {
        Self {
            footprint,
            levels,
            landmark: false,
        }
    }

    pub fn landmark(mut self, landmark: bool) -> Self {
        self.landmark = landmark;
        self
    }

    /// Check level count and every footprint vertex.
    pub fn validate(&self) -> SceneResult<()> {
        if self.levels == 0 {
            return Err(SceneError::InvalidLevels(self.levels));
        }
        if self.footprint.len() < 3 {
            return Err(SceneError::InvalidFootprint(format!(
                "need at least 3 vertices, got {}",
                self.footprint.len()
            )));
        }
        self.footprint.iter().try_for_each(GeoCoordinate::validate)
    }

    /// Extruded height in scene units.
    pub fn height(&self, level_height: f64) -> f64 {
        self.levels as f64 * level_height
    }
}

/// Rotation applied to every building mesh, composed as three.js composes an
/// XYZ Euler: `Rx * Ry * Rz`.
pub fn mesh_rotation() -> Rotation3<f64> {
    let [x, y, z] = MESH_EULER_XYZ;
    Rotation3::from_axis_angle(&Vector3::x_axis(), x)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), y)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), z)
}

/// A building placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: usize,
    pub record: BuildingRecord,
    /// Footprint in scene-plane coordinates
    pub footprint: Vec<PlanarPoint>,
    pub height: f64,
    pub mesh: MeshData,
    pub materials: BuildingMaterials,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Building {
    /// Project and extrude `record` with the given materials.
    pub fn build(
        id: usize,
        record: BuildingRecord,
        projector: &MercatorProjector,
        level_height: f64,
        materials: BuildingMaterials,
    ) -> SceneResult<Self> {
        Self::build_with(id, record, projector, level_height, |_| materials)
    }

    /// Project and extrude `record`, then pick its materials. `materials` is
    /// only called once the geometry is known to be valid.
    pub fn build_with<F>(
        id: usize,
        record: BuildingRecord,
        projector: &MercatorProjector,
        level_height: f64,
        materials: F,
    ) -> SceneResult<Self>
    where
        F: FnOnce(&BuildingRecord) -> BuildingMaterials,
    {
        record.validate()?;

        let footprint = record
            .footprint
            .iter()
            .map(|coord| projector.project_to_scene(coord))
            .collect::<SceneResult<Vec<_>>>()?;
        let height = record.height(level_height);
        let mesh = extrude_footprint(&footprint, height)?;

        tracing::debug!(
            id,
            vertices = footprint.len(),
            levels = record.levels,
            landmark = record.landmark,
            triangles = mesh.triangle_count(),
            "Extruded building"
        );

        let materials = materials(&record);
        Ok(Self {
            id,
            record,
            footprint,
            height,
            mesh,
            materials,
            cast_shadow: true,
            receive_shadow: true,
        })
    }

    /// Same building projected again with another projector. Materials are
    /// kept.
    pub fn reproject(&self, projector: &MercatorProjector, level_height: f64) -> SceneResult<Self> {
        Self::build(
            self.id,
            self.record.clone(),
            projector,
            level_height,
            self.materials.clone(),
        )
    }

    pub fn rotation(&self) -> Rotation3<f64> {
        mesh_rotation()
    }

    /// Mesh vertices after the building rotation, in scene space.
    pub fn world_positions(&self) -> Vec<[f64; 3]> {
        let rotation = self.rotation();
        self.mesh
            .positions
            .iter()
            .map(|p| {
                let world = rotation * Point3::new(p[0] as f64, p[1] as f64, p[2] as f64);
                [world.x, world.y, world.z]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialPalette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use scene_common::ProjectionConfig;

    fn materials() -> BuildingMaterials {
        MaterialPalette::new("tex").choose(&mut StdRng::seed_from_u64(0), false)
    }

    fn square(center: GeoCoordinate, half: f64) -> Vec<GeoCoordinate> {
        vec![
            GeoCoordinate::new(center.lon - half, center.lat - half),
            GeoCoordinate::new(center.lon + half, center.lat - half),
            GeoCoordinate::new(center.lon + half, center.lat + half),
            GeoCoordinate::new(center.lon - half, center.lat + half),
        ]
    }

    #[test]
    fn test_rotation_stands_extrusion_up() {
        let r = mesh_rotation();
        let up = r * Vector3::new(0.0, 0.0, 1.0);
        assert!((up - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);

        // Scene-plane (sx, sy) lands at (-sy, _, -sx)
        let p = r * Vector3::new(3.0, 7.0, 0.0);
        assert!((p - Vector3::new(-7.0, 0.0, -3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_levels_rejected() {
        let config = ProjectionConfig::default();
        let projector = MercatorProjector::new(config).unwrap();
        let record = BuildingRecord::new(square(config.center, 0.0001), 0);
        assert!(matches!(
            Building::build(0, record, &projector, 5.0, materials()),
            Err(SceneError::InvalidLevels(0))
        ));
    }

    #[test]
    fn test_height_from_levels() {
        let config = ProjectionConfig::default();
        let projector = MercatorProjector::new(config).unwrap();
        let record = BuildingRecord::new(square(config.center, 0.0001), 4);
        let building = Building::build(1, record, &projector, 5.0, materials()).unwrap();

        assert_eq!(building.height, 20.0);
        assert_eq!(building.mesh.triangle_count(), 2 * 2 + 2 * 4);
        let max_y = building
            .world_positions()
            .iter()
            .map(|p| p[1])
            .fold(f64::MIN, f64::max);
        assert!((max_y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_materials_only_chosen_for_valid_geometry() {
        let config = ProjectionConfig::default();
        let projector = MercatorProjector::new(config).unwrap();
        let mut called = false;

        let flat = BuildingRecord::new(
            vec![
                GeoCoordinate::new(0.0, 0.0),
                GeoCoordinate::new(0.001, 0.0),
                GeoCoordinate::new(0.002, 0.0),
            ],
            1,
        );
        let result = Building::build_with(0, flat, &projector, 5.0, |_| {
            called = true;
            materials()
        });
        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn test_record_defaults_from_json() {
        let record: BuildingRecord = serde_json::from_str(
            r#"{"footprint": [{"lon": 0.0, "lat": 0.0}, {"lon": 0.001, "lat": 0.0}, {"lon": 0.0, "lat": 0.001}]}"#,
        )
        .unwrap();
        assert_eq!(record.levels, 1);
        assert!(!record.landmark);
    }
}
