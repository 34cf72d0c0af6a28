//! Input triangle mesh

use crate::{Error, Result};
use glam::Vec3;

/// An indexed triangle list in object space (Y-up)
///
/// An empty index buffer means the vertices are a triangle soup: each run of
/// three consecutive vertices forms one triangle.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    /// The vertices of the mesh as a flat array of [x, y, z] coordinates
    pub vertices: Vec<f32>,
    /// The indices of the mesh, 3 per triangle
    pub indices: Vec<u32>,
}

impl TriMesh {
    /// Creates a new empty triangle mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from flat positions and an index buffer
    pub fn from_parts(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Creates a mesh from positions and an index buffer
    pub fn from_points(points: &[Vec3], indices: Vec<u32>) -> Self {
        let vertices = points.iter().flat_map(|p| p.to_array()).collect();
        Self { vertices, indices }
    }

    /// Number of vertices in the position buffer
    pub fn vert_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles described by the mesh
    pub fn tri_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len() / 3
        } else {
            self.vert_count() / 3
        }
    }

    /// Whether the mesh carries an index buffer
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Returns the position of vertex `i`
    pub fn vertex(&self, i: usize) -> Option<Vec3> {
        let base = i.checked_mul(3)?;
        let v = self.vertices.get(base..base + 3)?;
        Some(Vec3::new(v[0], v[1], v[2]))
    }

    /// Iterates the vertex index of every triangle corner, in order.
    ///
    /// For a non-indexed mesh this is `0..vert_count`.
    pub fn corner_indices(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        if self.is_indexed() {
            Box::new(self.indices.iter().copied())
        } else {
            Box::new(0..self.vert_count() as u32)
        }
    }

    /// Checks buffer lengths, index ranges and coordinate finiteness.
    ///
    /// Triangle shape (zero area, repeated corners) is not checked here.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() % 3 != 0 {
            return Err(Error::InvalidMesh(format!(
                "position buffer length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }

        if let Some(bad) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidMesh(format!(
                "vertex {} has a non-finite coordinate",
                bad / 3
            )));
        }

        if self.is_indexed() {
            if self.indices.len() % 3 != 0 {
                return Err(Error::InvalidMesh(format!(
                    "index buffer length {} is not a multiple of 3",
                    self.indices.len()
                )));
            }

            let vert_count = self.vert_count();
            if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vert_count) {
                return Err(Error::InvalidMesh(format!(
                    "index {} out of range for {} vertices",
                    bad, vert_count
                )));
            }
        } else if self.vert_count() % 3 != 0 {
            return Err(Error::InvalidMesh(format!(
                "non-indexed mesh has {} vertices, not a multiple of 3",
                self.vert_count()
            )));
        }

        Ok(())
    }

    /// Calculates the axis-aligned bounding box of the mesh
    pub fn calculate_bounds(&self) -> (Vec3, Vec3) {
        if self.vert_count() == 0 {
            return (Vec3::ZERO, Vec3::ZERO);
        }

        let mut bmin = Vec3::splat(f32::MAX);
        let mut bmax = Vec3::splat(f32::MIN);

        for v in self.vertices.chunks_exact(3) {
            let p = Vec3::new(v[0], v[1], v[2]);
            bmin = bmin.min(p);
            bmax = bmax.max(p);
        }

        (bmin, bmax)
    }
}
