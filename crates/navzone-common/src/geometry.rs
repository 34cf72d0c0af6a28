//! 2D geometry predicates
//!
//! Navigation queries resolve containment and turn direction on the XZ plane
//! (Y-up coordinate system). Heights are only consulted through explicit
//! height windows.

use glam::Vec3;

use crate::{distance_squared, Node};

/// Squared distance below which two points are treated as the same point.
pub const NEARLY_EQUAL_EPSILON_SQR: f32 = 0.00001;

/// Vertical slack added above and below a triangle when testing containment.
pub const POLYGON_HEIGHT_SLACK: f32 = 0.5;

/// Calculate twice the signed area of a triangle projected on the XZ plane.
///
/// The sign encodes the turn direction of `a -> b -> c` with the XZ plane
/// drawn as a chart (X to the right, Z up):
/// - Positive: `c` lies to the right of `a -> b` (clockwise turn)
/// - Negative: `c` lies to the left (counter-clockwise turn)
/// - Zero: collinear
#[inline]
pub fn tri_area_2d(a: &Vec3, b: &Vec3, c: &Vec3) -> f32 {
    let abx = b.x - a.x;
    let abz = b.z - a.z;
    let acx = c.x - a.x;
    let acz = c.z - a.z;
    acx * abz - abx * acz
}

/// Side of a directed line on which a point lies, on the XZ plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    /// Negative signed area
    Left,
    /// Positive signed area
    Right,
    /// Zero signed area
    Collinear,
}

/// Classifies the turn `a -> b -> c` by the sign of [`tri_area_2d`].
#[inline]
pub fn turn_direction(a: &Vec3, b: &Vec3, c: &Vec3) -> TurnDirection {
    let area = tri_area_2d(a, b, c);
    if area > 0.0 {
        TurnDirection::Right
    } else if area < 0.0 {
        TurnDirection::Left
    } else {
        TurnDirection::Collinear
    }
}

/// Check if two points are equal within [`NEARLY_EQUAL_EPSILON_SQR`].
#[inline]
pub fn nearly_equal(a: &Vec3, b: &Vec3) -> bool {
    distance_squared(a, b) < NEARLY_EQUAL_EPSILON_SQR
}

/// Round a value to a fixed number of decimal places.
///
/// Halves round away from zero.
#[inline]
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let factor = 10f32.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round every component of a vector with [`round_to`].
#[inline]
pub fn round_vec3(v: Vec3, decimals: u32) -> Vec3 {
    Vec3::new(
        round_to(v.x, decimals),
        round_to(v.y, decimals),
        round_to(v.z, decimals),
    )
}

/// Check if a point lies inside a triangle, projected on the XZ plane.
///
/// Takes the vertical component of the three edge cross products; the point is
/// inside when all three agree in sign (zero counts for either sign, so points
/// on an edge or vertex are inside). Winding does not matter. This is a
/// half-plane test on the horizontal projection, so it becomes unreliable for
/// near-vertical triangles.
pub fn point_in_triangle(tri: &[Vec3; 3], p: &Vec3) -> bool {
    let [a, b, c] = tri;

    let cross_ab = (*b - *a).cross(*p - *a).y;
    let cross_bc = (*c - *b).cross(*p - *b).y;
    let cross_ca = (*a - *c).cross(*p - *c).y;

    (cross_ab >= 0.0 && cross_bc >= 0.0 && cross_ca >= 0.0)
        || (cross_ab <= 0.0 && cross_bc <= 0.0 && cross_ca <= 0.0)
}

/// Check if a point lies on a node's triangle.
///
/// The point's height must be within [`POLYGON_HEIGHT_SLACK`] of the
/// triangle's vertical extent, and its XZ projection must pass
/// [`point_in_triangle`].
pub fn vector_in_polygon(point: &Vec3, node: &Node, vertices: &[Vec3]) -> bool {
    let mut tri = [Vec3::ZERO; 3];
    let mut lowest = f32::MAX;
    let mut highest = f32::MIN;

    for (slot, &v_id) in tri.iter_mut().zip(node.vertex_ids.iter()) {
        let Some(v) = vertices.get(v_id) else {
            return false;
        };
        lowest = lowest.min(v.y);
        highest = highest.max(v.y);
        *slot = *v;
    }

    point.y >= lowest - POLYGON_HEIGHT_SLACK
        && point.y <= highest + POLYGON_HEIGHT_SLACK
        && point_in_triangle(&tri, point)
}

/// Drop the vertical component of a point.
#[inline]
pub fn flatten_xz(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_tri() -> [Vec3; 3] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ]
    }

    #[test]
    fn test_tri_area_2d_sign() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let left = Vec3::new(1.0, 0.0, 1.0);
        let right = Vec3::new(1.0, 0.0, -1.0);

        assert!(tri_area_2d(&a, &b, &right) > 0.0);
        assert!(tri_area_2d(&a, &b, &left) < 0.0);
        assert_eq!(tri_area_2d(&a, &b, &Vec3::new(5.0, 3.0, 0.0)), 0.0);
        assert_eq!(turn_direction(&a, &b, &right), TurnDirection::Right);
        assert_eq!(turn_direction(&a, &b, &left), TurnDirection::Left);
    }

    #[test]
    fn test_tri_area_2d_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 10.0, 0.0);
        let c = Vec3::new(1.0, -4.0, 1.0);
        let flat = tri_area_2d(&flatten_xz(&a), &flatten_xz(&b), &flatten_xz(&c));
        assert_eq!(tri_area_2d(&a, &b, &c), flat);
    }

    #[test]
    fn test_point_in_triangle() {
        let tri = flat_tri();
        assert!(point_in_triangle(&tri, &Vec3::new(0.5, 0.0, 0.5)));
        assert!(!point_in_triangle(&tri, &Vec3::new(2.0, 0.0, 2.0)));
        assert!(!point_in_triangle(&tri, &Vec3::new(-0.1, 0.0, 0.5)));
    }

    #[test]
    fn test_point_in_triangle_either_winding() {
        let [a, b, c] = flat_tri();
        let p = Vec3::new(0.4, 0.0, 0.4);
        assert!(point_in_triangle(&[a, b, c], &p));
        assert!(point_in_triangle(&[a, c, b], &p));
    }

    #[test]
    fn test_point_in_triangle_on_vertex_and_edge() {
        let tri = flat_tri();
        assert!(point_in_triangle(&tri, &tri[0]));
        assert!(point_in_triangle(&tri, &tri[1]));
        assert!(point_in_triangle(&tri, &Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_point_in_triangle_ignores_height() {
        let tri = flat_tri();
        assert!(point_in_triangle(&tri, &Vec3::new(0.5, 100.0, 0.5)));
    }

    #[test]
    fn test_vector_in_polygon_height_window() {
        let vertices = flat_tri().to_vec();
        let node = Node::new(0, 0, [0, 1, 2], Vec3::new(0.67, 0.0, 0.67));

        assert!(vector_in_polygon(&Vec3::new(0.5, 0.0, 0.5), &node, &vertices));
        assert!(vector_in_polygon(&Vec3::new(0.5, 0.45, 0.5), &node, &vertices));
        assert!(vector_in_polygon(&Vec3::new(0.5, -0.45, 0.5), &node, &vertices));
        assert!(!vector_in_polygon(&Vec3::new(0.5, 0.6, 0.5), &node, &vertices));
        assert!(!vector_in_polygon(&Vec3::new(0.5, -0.6, 0.5), &node, &vertices));
    }

    #[test]
    fn test_vector_in_polygon_bad_vertex_id() {
        let vertices = flat_tri().to_vec();
        let node = Node::new(0, 0, [0, 1, 7], Vec3::ZERO);
        assert!(!vector_in_polygon(&Vec3::ZERO, &node, &vertices));
    }

    #[test]
    fn test_nearly_equal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert!(nearly_equal(&a, &(a + Vec3::splat(0.001))));
        assert!(!nearly_equal(&a, &(a + Vec3::new(0.01, 0.0, 0.0))));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-1.235001, 2), -1.24);
        assert_eq!(round_to(7.0, 2), 7.0);
        assert_eq!(round_to(0.126, 0), 0.0);
        assert_eq!(
            round_vec3(Vec3::new(0.333, 1.666, -0.004), 2),
            Vec3::new(0.33, 1.67, -0.0)
        );
    }
}
