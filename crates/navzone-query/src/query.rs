//! Spatial queries against a single zone

use std::collections::{HashSet, VecDeque};

use glam::Vec3;
use navzone_common::{
    closest_point_on_triangle, distance_squared, point_in_triangle, vector_in_polygon, Node,
    Plane, Zone,
};

/// Radius beyond which [`ZoneQuery::get_group`] reports no group
pub const GROUP_SEARCH_RADIUS: f32 = 50.0;

/// Plane distance within which a point counts as lying on a triangle
pub const COPLANAR_TOLERANCE: f32 = 0.01;

/// Deepest neighbour ring expanded by [`ZoneQuery::clamp_step`]
pub const CLAMP_STEP_MAX_DEPTH: usize = 2;

/// Result of [`ZoneQuery::clamp_step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedStep<'a> {
    /// Node containing `position`
    pub node: &'a Node,
    /// Closest reachable point on the mesh to the requested end point
    pub position: Vec3,
}

/// Read-only query interface over a [`Zone`]
#[derive(Debug, Clone, Copy)]
pub struct ZoneQuery<'a> {
    zone: &'a Zone,
}

impl<'a> ZoneQuery<'a> {
    pub fn new(zone: &'a Zone) -> Self {
        Self { zone }
    }

    /// The zone being queried
    pub fn zone(&self) -> &'a Zone {
        self.zone
    }

    /// Returns the group a position belongs to.
    ///
    /// With `check_polygon`, the first node (in group then node order) whose
    /// triangle contains the position returns its group right away, even if
    /// another node's centroid is closer. Otherwise the group of the node with
    /// the nearest centroid within [`GROUP_SEARCH_RADIUS`] wins.
    pub fn get_group(&self, position: &Vec3, check_polygon: bool) -> Option<usize> {
        let mut closest_group = None;
        let mut closest_distance = GROUP_SEARCH_RADIUS * GROUP_SEARCH_RADIUS;

        for (group_id, group) in self.zone.groups().iter().enumerate() {
            for node in group {
                if check_polygon && self.lies_on(node, position) {
                    return Some(group_id);
                }

                let d = distance_squared(&node.centroid, position);
                if d < closest_distance {
                    closest_group = Some(group_id);
                    closest_distance = d;
                }
            }
        }

        closest_group
    }

    /// Whether `position` is on the plane of `node`'s triangle and inside it
    fn lies_on(&self, node: &Node, position: &Vec3) -> bool {
        let Some(tri) = self.zone.triangle(node) else {
            return false;
        };
        let Some(plane) = Plane::from_triangle(&tri) else {
            return false;
        };

        plane.distance_to_point(position).abs() < COPLANAR_TOLERANCE
            && point_in_triangle(&tri, position)
    }

    /// Returns the node of `group_id` whose centroid is closest to `position`.
    ///
    /// With `check_polygon`, only nodes whose triangle contains the position
    /// (see [`vector_in_polygon`]) are candidates.
    pub fn get_closest_node(
        &self,
        position: &Vec3,
        group_id: usize,
        check_polygon: bool,
    ) -> Option<&'a Node> {
        let vertices = self.zone.vertices();
        let mut closest = None;
        let mut closest_distance = f32::INFINITY;

        for node in self.zone.group(group_id)? {
            let d = distance_squared(&node.centroid, position);
            if d < closest_distance
                && (!check_polygon || vector_in_polygon(position, node, vertices))
            {
                closest = Some(node);
                closest_distance = d;
            }
        }

        closest
    }

    /// Constrains a step from `start` towards `end` to the mesh.
    ///
    /// `end` is projected onto the plane of the node closest to `start`, then
    /// the nodes within [`CLAMP_STEP_MAX_DEPTH`] rings of neighbours (and the
    /// ring just beyond) are searched for the point nearest to it.
    pub fn clamp_step(&self, start: &Vec3, end: &Vec3, group_id: usize) -> Option<ClampedStep<'a>> {
        let group = self.zone.group(group_id)?;
        let start_node = self.get_closest_node(start, group_id, false)?;

        let target = self
            .zone
            .triangle(start_node)
            .and_then(|tri| Plane::from_triangle(&tri))
            .map_or(*end, |plane| plane.project_point(end));

        let mut best: Option<ClampedStep<'a>> = None;
        let mut best_distance = f32::INFINITY;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start_node.id);
        queue.push_back((start_node, 0));

        while let Some((node, depth)) = queue.pop_front() {
            if let Some(tri) = self.zone.triangle(node) {
                let point = closest_point_on_triangle(&target, &tri);
                let d = distance_squared(&point, &target);
                if d < best_distance {
                    best = Some(ClampedStep {
                        node,
                        position: point,
                    });
                    best_distance = d;
                }
            }

            if depth > CLAMP_STEP_MAX_DEPTH {
                continue;
            }

            for &neighbour_id in &node.neighbours {
                let Some(neighbour) = group.get(neighbour_id) else {
                    continue;
                };
                if visited.insert(neighbour_id) {
                    queue.push_back((neighbour, depth + 1));
                }
            }
        }

        best
    }
}
