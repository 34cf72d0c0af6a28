//! Zone registry and path queries

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use navzone_build::{ZoneBuilder, ZoneConfig};
use navzone_common::{tri_area_2d, Node, Result, TriMesh, Zone};

use crate::astar::find_corridor;
use crate::funnel::{string_pull, Portal};
use crate::query::{ClampedStep, ZoneQuery};

/// A path found by [`Pathfinding::find_path`]
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Waypoints after the start position, ending at the target
    pub path: Vec<Vec3>,
    /// Local ids of the nodes crossed after the start node, ending with the target node
    pub node_corridor: Vec<usize>,
    /// Portals handed to the funnel, ending with the zero-width target portal
    pub portal_corridor: Vec<Portal>,
}

/// Registry of zones keyed by name, and the entry point for queries
#[derive(Debug, Clone, Default)]
pub struct Pathfinding {
    zones: HashMap<String, Arc<Zone>>,
}

impl Pathfinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a zone from a triangle mesh, welding vertices within `tolerance`
    pub fn create_zone(mesh: &TriMesh, tolerance: f32) -> Result<Zone> {
        Self::create_zone_with_config(mesh, ZoneConfig::with_tolerance(tolerance))
    }

    /// Builds a zone from a triangle mesh with full control over the build
    pub fn create_zone_with_config(mesh: &TriMesh, config: ZoneConfig) -> Result<Zone> {
        ZoneBuilder::new(config).build(mesh)
    }

    /// Installs a zone under `zone_id`, replacing any zone already there
    pub fn set_zone_data(&mut self, zone_id: impl Into<String>, zone: impl Into<Arc<Zone>>) {
        let zone_id = zone_id.into();
        let zone = zone.into();
        log::debug!(
            "Installing zone '{}' ({} groups, {} nodes)",
            zone_id,
            zone.group_count(),
            zone.node_count()
        );
        self.zones.insert(zone_id, zone);
    }

    /// Returns the zone installed under `zone_id`
    pub fn zone(&self, zone_id: &str) -> Option<&Arc<Zone>> {
        self.zones.get(zone_id)
    }

    pub fn has_zone(&self, zone_id: &str) -> bool {
        self.zones.contains_key(zone_id)
    }

    /// Names of all installed zones, in no particular order
    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    /// Query interface over one installed zone
    pub fn query(&self, zone_id: &str) -> Option<ZoneQuery<'_>> {
        match self.zones.get(zone_id) {
            Some(zone) => Some(ZoneQuery::new(zone)),
            None => {
                log::debug!("Unknown zone '{}'", zone_id);
                None
            }
        }
    }

    /// See [`ZoneQuery::get_group`]
    pub fn get_group(&self, zone_id: &str, position: &Vec3, check_polygon: bool) -> Option<usize> {
        self.query(zone_id)?.get_group(position, check_polygon)
    }

    /// See [`ZoneQuery::get_closest_node`]
    pub fn get_closest_node(
        &self,
        position: &Vec3,
        zone_id: &str,
        group_id: usize,
        check_polygon: bool,
    ) -> Option<&Node> {
        self.query(zone_id)?
            .get_closest_node(position, group_id, check_polygon)
    }

    /// See [`ZoneQuery::clamp_step`]
    pub fn clamp_step(
        &self,
        start: &Vec3,
        end: &Vec3,
        zone_id: &str,
        group_id: usize,
    ) -> Option<ClampedStep<'_>> {
        self.query(zone_id)?.clamp_step(start, end, group_id)
    }

    /// Finds a path from `start` to `target` within one group.
    ///
    /// Both positions must lie on a node of the group; otherwise `None` is
    /// returned and the caller should fall back to [`Pathfinding::clamp_step`].
    pub fn find_path(
        &self,
        start: &Vec3,
        target: &Vec3,
        zone_id: &str,
        group_id: usize,
    ) -> Option<PathResult> {
        let query = self.query(zone_id)?;
        let zone = query.zone();
        let group = zone.group(group_id)?;

        let (Some(start_node), Some(target_node)) = (
            query.get_closest_node(start, group_id, true),
            query.get_closest_node(target, group_id, true),
        ) else {
            log::debug!(
                "No node of zone '{}' group {} contains both path endpoints",
                zone_id,
                group_id
            );
            return None;
        };

        let node_corridor = find_corridor(group, start_node.id, target_node.id);
        if node_corridor.is_empty() && start_node.id != target_node.id {
            log::debug!(
                "Nodes {} and {} of zone '{}' group {} are not connected",
                start_node.id,
                target_node.id,
                zone_id,
                group_id
            );
            return None;
        }

        let mut portal_corridor = Vec::with_capacity(node_corridor.len() + 1);
        let mut from = start_node;
        for &next in &node_corridor {
            portal_corridor.push(portal_between(zone, from, next)?);
            from = group.get(next)?;
        }
        portal_corridor.push(Portal::point(*target));

        // The start position is already known to the caller
        let mut path: Vec<Vec3> = string_pull(*start, *target, &portal_corridor)
            .into_iter()
            .skip(1)
            .collect();
        if path.is_empty() {
            // Start and target coincide
            path.push(*target);
        }

        Some(PathResult {
            path,
            node_corridor,
            portal_corridor,
        })
    }
}

/// Portal from `from` into its neighbour `to`, oriented as seen from `from`
fn portal_between(zone: &Zone, from: &Node, to: usize) -> Option<Portal> {
    let [a, b] = from.portal_to(to)?;
    let vertices = zone.vertices();
    let (a, b) = (*vertices.get(a)?, *vertices.get(b)?);

    if tri_area_2d(&from.centroid, &a, &b) >= 0.0 {
        Some(Portal::new(a, b))
    } else {
        Some(Portal::new(b, a))
    }
}
