//! Vertex welding
//!
//! Near-duplicate vertices are merged by quantizing each coordinate into an
//! integer bucket, `trunc(coord / tolerance)`. The first vertex that lands in
//! a bucket becomes canonical and every later vertex in the same bucket is
//! remapped onto it.
//!
//! Truncation moves toward zero, so the bucket straddling zero on each axis is
//! twice as wide as the others: `-0.9 * tolerance` and `0.9 * tolerance` weld
//! together, while `1.1 * tolerance` and `1.9 * tolerance` do too but
//! `-1.1 * tolerance` and `-0.9 * tolerance` do not.

use std::collections::HashMap;

use glam::Vec3;
use navzone_common::{Error, Result, TriMesh};

/// Welded vertex positions plus the rewritten index buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeldedGeometry {
    /// Canonical vertices, in order of first reference
    pub vertices: Vec<Vec3>,
    /// Three indices per triangle into `vertices`
    pub indices: Vec<u32>,
}

impl WeldedGeometry {
    /// Number of triangles
    pub fn tri_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner indices of triangle `i`
    pub fn triangle(&self, i: usize) -> [u32; 3] {
        let base = i * 3;
        [
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
        ]
    }

    /// Converts back into an indexed mesh, e.g. to weld again
    pub fn to_tri_mesh(&self) -> TriMesh {
        TriMesh::from_points(&self.vertices, self.indices.clone())
    }
}

/// Bucket key of a position for the given scale (`1 / tolerance`)
#[inline]
fn bucket_key(p: Vec3, scale: f64) -> [i64; 3] {
    [
        (p.x as f64 * scale).trunc() as i64,
        (p.y as f64 * scale).trunc() as i64,
        (p.z as f64 * scale).trunc() as i64,
    ]
}

/// Welds vertices of `mesh` that fall into the same tolerance bucket.
///
/// The mesh buffers must already be valid (see [`TriMesh::validate`]).
/// Vertices referenced by no triangle are dropped. The output index buffer has
/// the same length as the input corner list, so triangles keep their order and
/// winding.
pub fn weld_vertices(mesh: &TriMesh, tolerance: f32) -> Result<WeldedGeometry> {
    if !(tolerance.is_finite() && tolerance >= f32::EPSILON) {
        return Err(Error::InvalidTolerance(tolerance));
    }

    let scale = 1.0 / tolerance as f64;
    let mut bucket_to_index: HashMap<[i64; 3], u32> = HashMap::new();
    let mut vertices = Vec::new();
    let mut indices = Vec::with_capacity(mesh.tri_count() * 3);

    for corner in mesh.corner_indices() {
        let p = mesh.vertex(corner as usize).ok_or_else(|| {
            Error::InvalidMesh(format!("index {} has no matching vertex", corner))
        })?;

        let key = bucket_key(p, scale);
        let index = match bucket_to_index.get(&key) {
            Some(&index) => index,
            None => {
                let index = u32::try_from(vertices.len()).map_err(|_| {
                    Error::ZoneBuild("welded vertex count exceeds u32 range".to_string())
                })?;
                vertices.push(p);
                bucket_to_index.insert(key, index);
                index
            }
        };
        indices.push(index);
    }

    Ok(WeldedGeometry { vertices, indices })
}
