//! String pulling through a portal corridor
//!
//! The funnel runs on the XZ plane with a moving apex and two funnel edges.
//! Whenever an edge would cross the other, the opposite funnel vertex becomes
//! a path point and the scan restarts from the portal that vertex came from.
//! Portals the start or the end already lies on are crossed for free and are
//! dropped before the scan; a funnel seeded with an edge through its own apex
//! has no usable sides.
//!
//! Because the funnel only sees the horizontal projection, every committed
//! segment is checked against the portals it skips; a portal whose 3-D edge
//! stays noticeably away from the segment (a slope or step the projection
//! hides) contributes an extra point on its edge.

use glam::Vec3;
use navzone_common::{
    closest_point_on_segment, closest_points_between_segments, distance_squared, flatten_xz,
    nearly_equal, tri_area_2d,
};

/// Squared distance above which a skipped portal gets its own path point
pub const PORTAL_DEVIATION_SQR: f32 = 0.01;

/// Squared distance within which the last portal is considered to end at the target
pub const END_PORTAL_EPSILON_SQR: f32 = 0.001;

/// An edge the path has to cross.
///
/// Seen from the node being left, `right` is clockwise of `left` on the XZ
/// chart, i.e. `tri_area_2d(from, left, right) > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    pub left: Vec3,
    pub right: Vec3,
}

impl Portal {
    pub fn new(left: Vec3, right: Vec3) -> Self {
        Self { left, right }
    }

    /// A zero-width portal at `point`
    pub fn point(point: Vec3) -> Self {
        Self {
            left: point,
            right: point,
        }
    }

    /// Whether `point` lies on the edge when both are projected onto the XZ plane
    pub fn contains_2d(&self, point: &Vec3) -> bool {
        let p = flatten_xz(point);
        let closest =
            closest_point_on_segment(&p, &flatten_xz(&self.left), &flatten_xz(&self.right));
        nearly_equal(&p, &closest)
    }
}

/// Pulls a taut path from `start` to `end` through `portals`.
///
/// The returned path starts with `start` and ends at the last portal (which is
/// `end` itself; a zero-width end portal is appended when the corridor does not
/// already finish there). Without portals the path is the straight segment.
pub fn string_pull(start: Vec3, end: Vec3, portals: &[Portal]) -> Vec<Vec3> {
    if portals.is_empty() {
        return vec![start, end];
    }

    let mut portals = portals.to_vec();
    if let Some(last) = portals.last() {
        if distance_squared(&last.left, &end) > END_PORTAL_EPSILON_SQR {
            portals.push(Portal::point(end));
        }
    }

    // The end portal always stays
    if let Some(end_portal) = portals.pop() {
        while portals.last().is_some_and(|p| p.contains_2d(&end)) {
            portals.pop();
        }
        let leading = portals.iter().take_while(|p| p.contains_2d(&start)).count();
        portals.drain(..leading);
        portals.push(end_portal);
    }

    let mut path = vec![start];

    let mut apex = start;
    let mut left = portals[0].left;
    let mut right = portals[0].right;
    let mut apex_index = 0;
    let mut left_index = 0;
    let mut right_index = 0;

    let mut i = 1;
    while i < portals.len() {
        let next_left = portals[i].left;
        let next_right = portals[i].right;

        // Update right vertex
        if tri_area_2d(&apex, &right, &next_right) <= 0.0 {
            if nearly_equal(&apex, &right) || tri_area_2d(&apex, &left, &next_right) > 0.0 {
                // Tighten the funnel
                right = next_right;
                right_index = i;
            } else {
                // Right crossed left: left becomes the new apex
                commit_vertex(&apex, &left, apex_index, left_index, &portals, &mut path);

                apex = left;
                apex_index = left_index;
                right = apex;
                right_index = apex_index;

                i = apex_index + 1;
                continue;
            }
        }

        // Update left vertex
        if tri_area_2d(&apex, &left, &next_left) >= 0.0 {
            if nearly_equal(&apex, &left) || tri_area_2d(&apex, &right, &next_left) < 0.0 {
                // Tighten the funnel
                left = next_left;
                left_index = i;
            } else {
                // Left crossed right: right becomes the new apex
                commit_vertex(&apex, &right, apex_index, right_index, &portals, &mut path);

                apex = right;
                apex_index = right_index;
                left = apex;
                left_index = apex_index;

                i = apex_index + 1;
                continue;
            }
        }

        i += 1;
    }

    if let Some(last) = portals.last() {
        let finished = path.last().is_some_and(|p| nearly_equal(p, &last.left));
        if !finished {
            path.push(last.left);
        }
    }

    path
}

/// Appends `vertex` as the new apex, preceded by the points of the portals
/// skipped since `apex`.
///
/// Nothing is added when the funnel collapses back onto the current apex,
/// which happens when several portals in a row share that vertex.
fn commit_vertex(
    apex: &Vec3,
    vertex: &Vec3,
    from: usize,
    to: usize,
    portals: &[Portal],
    path: &mut Vec<Vec3>,
) {
    if nearly_equal(apex, vertex) {
        return;
    }
    insert_skipped_portals(apex, vertex, from, to, portals, path);
    path.push(*vertex);
}

/// Adds a point for every portal in `from..to` that the segment `a-b` misses in 3-D.
///
/// The point sits on the portal edge where the horizontal projections of the
/// segment and the edge come closest.
fn insert_skipped_portals(
    a: &Vec3,
    b: &Vec3,
    from: usize,
    to: usize,
    portals: &[Portal],
    path: &mut Vec<Vec3>,
) {
    for portal in portals.iter().take(to).skip(from) {
        let closest = closest_points_between_segments(a, b, &portal.left, &portal.right);
        if closest.distance_squared <= PORTAL_DEVIATION_SQR {
            continue;
        }

        let flat = closest_points_between_segments(
            &flatten_xz(a),
            &flatten_xz(b),
            &flatten_xz(&portal.left),
            &flatten_xz(&portal.right),
        );
        path.push(portal.left.lerp(portal.right, flat.t));
    }
}
