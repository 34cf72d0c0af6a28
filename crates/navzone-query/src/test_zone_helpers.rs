//! Small meshes and zones shared by the query tests

use glam::Vec3;
use navzone_build::ZoneBuilder;
use navzone_common::{TriMesh, Zone};

/// Builds a zone with the default configuration
pub fn build(mesh: &TriMesh) -> Zone {
    ZoneBuilder::default()
        .build(mesh)
        .expect("test mesh must build")
}

/// 2x2 square split along its (0,0)-(2,2) diagonal
///
/// Node 0 is the half with `z < x`, node 1 the half with `z > x`.
pub fn quad_mesh() -> TriMesh {
    TriMesh::from_points(
        &[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 2.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}

/// Row of `cells` unit squares along +X, z in [0, 1], two triangles per cell.
///
/// In cell `i`, node `2i` is the half with `x + z < i + 1` and node `2i + 1`
/// the other half. The nodes form a single chain in id order.
pub fn strip_mesh(cells: usize) -> TriMesh {
    let heights = vec![0.0; cells + 1];
    strip_with_heights(&heights)
}

/// Strip of `heights.len() - 1` cells whose column `i` (at `x = i`) sits at `heights[i]`
pub fn strip_with_heights(heights: &[f32]) -> TriMesh {
    let mut points = Vec::new();
    for (i, &y) in heights.iter().enumerate() {
        points.push(Vec3::new(i as f32, y, 0.0));
        points.push(Vec3::new(i as f32, y, 1.0));
    }

    let mut indices = Vec::new();
    for i in 0..heights.len().saturating_sub(1) as u32 {
        let (a, b, c, d) = (i * 2, i * 2 + 1, i * 2 + 2, i * 2 + 3);
        indices.extend_from_slice(&[a, b, c, c, b, d]);
    }

    TriMesh::from_points(&points, indices)
}

/// Three cells: flat at height 0, a slope up to height 1, flat at height 1
pub fn ramp_mesh() -> TriMesh {
    strip_with_heights(&[0.0, 0.0, 1.0, 1.0])
}

/// Two unit quads ten units apart, triangles interleaved in the input
pub fn two_islands_mesh() -> TriMesh {
    TriMesh::from_points(
        &[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(11.0, 0.0, 0.0),
            Vec3::new(11.0, 0.0, 1.0),
            Vec3::new(10.0, 0.0, 1.0),
        ],
        vec![0, 1, 2, 4, 5, 6, 0, 2, 3, 4, 6, 7],
    )
}

/// L-shaped corridor: east from the origin cell, then north
///
/// Cells are [0,1]x[0,1], [1,2]x[0,1] and [1,2]x[1,2]; the inner corner is
/// at (1, 0, 1).
pub fn corner_mesh() -> TriMesh {
    TriMesh::from_points(
        &[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, 2.0),
        ],
        vec![0, 3, 1, 1, 3, 4, 1, 4, 2, 2, 4, 5, 4, 6, 5, 5, 6, 7],
    )
}

/// Unit cells at the given `(x, z)` grid positions, split like [`strip_mesh`]
///
/// Every cell brings its own four corners; welding joins neighbouring cells.
/// Diagonals run from `(x, z + 1)` to `(x + 1, z)`.
pub fn grid_mesh(cells: &[(u32, u32)]) -> TriMesh {
    let mut points = Vec::new();
    let mut indices = Vec::new();
    for &(x, z) in cells {
        let base = points.len() as u32;
        let (x, z) = (x as f32, z as f32);
        points.push(Vec3::new(x, 0.0, z));
        points.push(Vec3::new(x, 0.0, z + 1.0));
        points.push(Vec3::new(x + 1.0, 0.0, z));
        points.push(Vec3::new(x + 1.0, 0.0, z + 1.0));
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }
    TriMesh::from_points(&points, indices)
}

/// Row of four cells along z = 0 and a column of three more on top of the last one
///
/// The inner corner is at (3, 0, 1).
pub fn l_grid_mesh() -> TriMesh {
    grid_mesh(&[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2), (3, 3)])
}

/// Two rows of four cells (z = 0 and z = 3) joined by a column at x = 3
///
/// The inner corners are at (3, 0, 1) and (3, 0, 3).
pub fn u_grid_mesh() -> TriMesh {
    grid_mesh(&[
        (0, 0),
        (1, 0),
        (2, 0),
        (3, 0),
        (3, 1),
        (3, 2),
        (3, 3),
        (2, 3),
        (1, 3),
        (0, 3),
    ])
}

pub fn quad() -> Zone {
    build(&quad_mesh())
}

pub fn strip(cells: usize) -> Zone {
    build(&strip_mesh(cells))
}

pub fn ramp() -> Zone {
    build(&ramp_mesh())
}

pub fn two_islands() -> Zone {
    build(&two_islands_mesh())
}

pub fn corner() -> Zone {
    build(&corner_mesh())
}

/// Asserts that no two consecutive path points coincide
pub fn assert_no_repeated_points(path: &[Vec3]) {
    for pair in path.windows(2) {
        assert!(
            !navzone_common::nearly_equal(&pair[0], &pair[1]),
            "repeated point {:?} in {:?}",
            pair[0],
            path
        );
    }
}

/// Asserts two points agree within `1e-4` on every axis
pub fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
