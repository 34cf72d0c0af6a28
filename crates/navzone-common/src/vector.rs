//! Vector and segment distance utilities

use glam::Vec3;

/// Segments shorter than this (squared) are treated as points.
const SEGMENT_EPSILON_SQR: f32 = 1e-12;

/// Calculates the distance between two points
#[inline]
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    (*b - *a).length()
}

/// Calculates the squared distance between two points
#[inline]
pub fn distance_squared(a: &Vec3, b: &Vec3) -> f32 {
    (*b - *a).length_squared()
}

/// Finds the closest point on a line segment to a given point
pub fn closest_point_on_segment(p: &Vec3, a: &Vec3, b: &Vec3) -> Vec3 {
    let ab = *b - *a;
    let ab_len_sq = ab.length_squared();

    if ab_len_sq < f32::EPSILON {
        return *a;
    }

    let t = ((*p - *a).dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    *a + ab * t
}

/// Closest points between two segments, as found by [`closest_points_between_segments`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClosestPoints {
    /// Parameter along the first segment, in [0, 1]
    pub s: f32,
    /// Parameter along the second segment, in [0, 1]
    pub t: f32,
    /// Closest point on the first segment
    pub on_first: Vec3,
    /// Closest point on the second segment
    pub on_second: Vec3,
    /// Squared distance between the two closest points
    pub distance_squared: f32,
}

/// Computes the closest points between segments `p1-q1` and `p2-q2`.
///
/// Degenerate (zero length) segments are handled as points. For parallel
/// segments the point with `s = 0` is chosen on the first segment.
pub fn closest_points_between_segments(
    p1: &Vec3,
    q1: &Vec3,
    p2: &Vec3,
    q2: &Vec3,
) -> SegmentClosestPoints {
    let d1 = *q1 - *p1;
    let d2 = *q2 - *p2;
    let r = *p1 - *p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (s, t) = if a <= SEGMENT_EPSILON_SQR && e <= SEGMENT_EPSILON_SQR {
        (0.0, 0.0)
    } else if a <= SEGMENT_EPSILON_SQR {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= SEGMENT_EPSILON_SQR {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;

            let mut s = if denom != 0.0 {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;

            // Recompute s when t falls outside the second segment
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    let on_first = *p1 + d1 * s;
    let on_second = *p2 + d2 * t;

    SegmentClosestPoints {
        s,
        t,
        on_first,
        on_second,
        distance_squared: (on_first - on_second).length_squared(),
    }
}
