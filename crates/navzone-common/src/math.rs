//! Triangle and plane math

use glam::Vec3;

/// Normals shorter than this mark a triangle as degenerate.
const DEGENERATE_NORMAL_EPSILON: f32 = 1e-12;

/// Calculates the area of a triangle
pub fn triangle_area(tri: &[Vec3; 3]) -> f32 {
    let [a, b, c] = tri;
    (*b - *a).cross(*c - *a).length() * 0.5
}

/// Calculates the centroid (vertex average) of a triangle
#[inline]
pub fn triangle_centroid(tri: &[Vec3; 3]) -> Vec3 {
    (tri[0] + tri[1] + tri[2]) / 3.0
}

/// Find the closest point on a triangle to a given point
pub fn closest_point_on_triangle(p: &Vec3, tri: &[Vec3; 3]) -> Vec3 {
    let [a, b, c] = tri;
    let ab = *b - *a;
    let ac = *c - *a;

    // Vertex region outside A
    let ap = *p - *a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    // Vertex region outside B
    let bp = *p - *b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    // Edge region AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return *a + ab * v;
    }

    // Vertex region outside C
    let cp = *p - *c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    // Edge region AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return *a + ac * w;
    }

    // Edge region BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return *b + (*c - *b) * w;
    }

    // Inside the face
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    *a + ab * v + ac * w
}

/// An infinite plane `normal . p + constant = 0` with unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// Builds the plane through three points.
    ///
    /// The normal follows the winding `(c - b) x (a - b)`. Returns `None` when
    /// the points are collinear or coincident.
    pub fn from_coplanar_points(a: &Vec3, b: &Vec3, c: &Vec3) -> Option<Self> {
        let normal = (*c - *b).cross(*a - *b);
        let len_sq = normal.length_squared();
        if len_sq <= DEGENERATE_NORMAL_EPSILON {
            return None;
        }

        let normal = normal / len_sq.sqrt();
        Some(Self {
            normal,
            constant: -a.dot(normal),
        })
    }

    /// Builds the supporting plane of a triangle.
    pub fn from_triangle(tri: &[Vec3; 3]) -> Option<Self> {
        Self::from_coplanar_points(&tri[0], &tri[1], &tri[2])
    }

    /// Signed distance from the plane to a point
    #[inline]
    pub fn distance_to_point(&self, p: &Vec3) -> f32 {
        self.normal.dot(*p) + self.constant
    }

    /// Orthogonal projection of a point onto the plane
    #[inline]
    pub fn project_point(&self, p: &Vec3) -> Vec3 {
        *p - self.normal * self.distance_to_point(p)
    }
}
