//! Extrusion of planar footprints into closed triangle meshes.
//!
//! A footprint in the scene plane is swept along +Z by the building height.
//! Caps are triangulated by ear clipping so concave outlines work; walls are
//! one quad per edge. Material group 0 covers both caps (the roof material),
//! group 1 the walls.

use serde::{Deserialize, Serialize};

use scene_common::{PlanarPoint, SceneError, SceneResult};

/// Material slot used by the top and bottom caps.
pub const CAP_MATERIAL: usize = 0;

/// Material slot used by the side walls.
pub const WALL_MATERIAL: usize = 1;

/// Vertices closer than this are treated as the same point.
const VERTEX_EPSILON: f64 = 1e-9;

/// A contiguous run of indices drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialGroup {
    /// First index (into `MeshData::indices`)
    pub start: usize,
    /// Number of indices
    pub count: usize,
    /// Slot in the owning building's material list
    pub material_index: usize,
}

/// Indexed triangle mesh in object space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub groups: Vec<MaterialGroup>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: [f64; 3], normal: [f64; 3]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions
            .push([position[0] as f32, position[1] as f32, position[2] as f32]);
        self.normals
            .push([normal[0] as f32, normal[1] as f32, normal[2] as f32]);
        index
    }

    /// Close the current run of indices into a material group.
    fn close_group(&mut self, start: usize, material_index: usize) {
        let count = self.indices.len() - start;
        if count > 0 {
            self.groups.push(MaterialGroup {
                start,
                count,
                material_index,
            });
        }
    }
}

/// Twice the signed area of a ring; positive when counter-clockwise.
fn signed_area2(ring: &[PlanarPoint]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Clean a footprint ring: drop repeated and closing vertices, check it still
/// encloses an area, and orient it counter-clockwise.
pub fn normalize_ring(points: &[PlanarPoint]) -> SceneResult<Vec<PlanarPoint>> {
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(SceneError::InvalidFootprint(format!(
            "non-finite vertex ({}, {})",
            bad.x, bad.y
        )));
    }

    let mut ring: Vec<PlanarPoint> = Vec::with_capacity(points.len());
    for p in points {
        if ring
            .last()
            .map_or(true, |last| last.distance(p) > VERTEX_EPSILON)
        {
            ring.push(*p);
        }
    }
    // Explicitly closed rings repeat the first vertex at the end.
    while ring.len() > 1 && ring[0].distance(&ring[ring.len() - 1]) <= VERTEX_EPSILON {
        ring.pop();
    }

    if ring.len() < 3 {
        return Err(SceneError::InvalidFootprint(format!(
            "need at least 3 distinct vertices, got {}",
            ring.len()
        )));
    }

    let area2 = signed_area2(&ring);
    if area2.abs() <= VERTEX_EPSILON {
        return Err(SceneError::InvalidFootprint(
            "footprint encloses no area".to_string(),
        ));
    }
    if area2 < 0.0 {
        ring.reverse();
    }

    Ok(ring)
}

/// Triangulate a counter-clockwise ring. Every returned triangle is
/// counter-clockwise too.
fn triangulate(ring: &[PlanarPoint]) -> SceneResult<Vec<[usize; 3]>> {
    let flat: Vec<f64> = ring.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&flat, &[], 2)
        .map_err(|e| SceneError::Triangulation(format!("{:?}", e)))?;

    // Collinear vertices may be folded away, so fewer than n - 2 triangles
    // is fine; none at all means the outline crosses itself
    if indices.is_empty() {
        return Err(SceneError::Triangulation(format!(
            "no triangles for {} vertices (self-intersecting footprint?)",
            ring.len()
        )));
    }

    Ok(indices
        .chunks_exact(3)
        .map(|t| {
            let (a, b, c) = (ring[t[0]], ring[t[1]], ring[t[2]]);
            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            if cross < 0.0 {
                [t[0], t[2], t[1]]
            } else {
                [t[0], t[1], t[2]]
            }
        })
        .collect())
}

/// Extrude a footprint along +Z from 0 to `height`.
///
/// Accepts either winding and an optional closing vertex. The result is a
/// closed solid with outward normals: `2 * (n - 2)` cap triangles followed
/// by `2 * n` wall triangles for an `n`-vertex footprint with no collinear
/// vertices.
pub fn extrude_footprint(points: &[PlanarPoint], height: f64) -> SceneResult<MeshData> {
    if !height.is_finite() || height <= 0.0 {
        return Err(SceneError::InvalidFootprint(format!(
            "extrusion height must be positive, got {}",
            height
        )));
    }

    let ring = normalize_ring(points)?;
    let triangles = triangulate(&ring)?;
    let n = ring.len();

    let mut mesh = MeshData::new();
    mesh.positions.reserve(2 * n + 4 * n);
    mesh.normals.reserve(2 * n + 4 * n);
    mesh.indices.reserve(6 * (n - 2) + 6 * n);

    // Caps
    let caps_start = mesh.indices.len();
    let bottom: Vec<u32> = ring
        .iter()
        .map(|p| mesh.push_vertex([p.x, p.y, 0.0], [0.0, 0.0, -1.0]))
        .collect();
    let top: Vec<u32> = ring
        .iter()
        .map(|p| mesh.push_vertex([p.x, p.y, height], [0.0, 0.0, 1.0]))
        .collect();
    for [a, b, c] in &triangles {
        // Bottom faces down: reverse the winding
        mesh.indices.extend_from_slice(&[bottom[*a], bottom[*c], bottom[*b]]);
    }
    for [a, b, c] in &triangles {
        mesh.indices.extend_from_slice(&[top[*a], top[*b], top[*c]]);
    }
    mesh.close_group(caps_start, CAP_MATERIAL);

    // Walls
    let walls_start = mesh.indices.len();
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        let len = p.distance(&q);
        // Right-hand side of a counter-clockwise edge points outward
        let normal = [(q.y - p.y) / len, -(q.x - p.x) / len, 0.0];

        let a = mesh.push_vertex([p.x, p.y, 0.0], normal);
        let b = mesh.push_vertex([q.x, q.y, 0.0], normal);
        let c = mesh.push_vertex([q.x, q.y, height], normal);
        let d = mesh.push_vertex([p.x, p.y, height], normal);
        mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
    mesh.close_group(walls_start, WALL_MATERIAL);

    Ok(mesh)
}
