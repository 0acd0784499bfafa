//! Geographic to local planar projection.
//!
//! Implements the spherical Mercator projection from scratch without external
//! dependencies, plus the axis remap that aligns projected points with the
//! ground plane of the 3D scene.

pub mod mercator;

pub use mercator::{
    project, project_to_scene, to_scene, unproject, unproject_from_scene, MercatorProjector,
};
