//! Sunlit building scene.
//!
//! Building footprints are projected onto the scene plane, extruded into
//! closed meshes and lit by a sun that follows real ephemeris:
//! - `mesh` extrusion and cap triangulation
//! - `building` records and placed buildings
//! - `material` roof and wall variants
//! - `objects` lights, floor, camera, axis helpers
//! - `scene` the scene and its operations
//! - `events` change notifications

pub mod building;
pub mod config;
pub mod events;
pub mod material;
pub mod mesh;
pub mod objects;
pub mod scene;
pub mod snapshot;

pub use building::{Building, BuildingRecord};
pub use config::SceneConfig;
pub use events::SceneEvent;
pub use material::{BuildingMaterials, Material, MaterialPalette};
pub use mesh::{extrude_footprint, MeshData};
pub use scene::Scene;
pub use snapshot::{BuildingSnapshot, SceneSnapshot};
