//! Zone data: the immutable output of a zone build
//!
//! A [`Zone`] owns the welded vertex array and the list of connected groups.
//! Every [`Node`] is one triangle; its ids (`id`, `neighbours`) are local to
//! the group it belongs to, and `neighbours[i]` is reached through the shared
//! edge `portals[i]`.

use glam::Vec3;

use crate::{Error, Result};

/// A triangle of the navigation graph
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Node {
    /// Index of this node within its group
    pub id: usize,
    /// Index of the group containing this node
    pub group: usize,
    /// Vertex indices into the zone's vertex array, in input winding order
    pub vertex_ids: [usize; 3],
    /// Group-local ids of adjacent nodes
    pub neighbours: Vec<usize>,
    /// Shared edge (vertex index pair) for each entry of `neighbours`
    pub portals: Vec<[usize; 2]>,
    /// Rounded vertex average of the triangle
    pub centroid: Vec3,
}

impl Node {
    /// Creates a node without neighbours
    pub fn new(id: usize, group: usize, vertex_ids: [usize; 3], centroid: Vec3) -> Self {
        Self {
            id,
            group,
            vertex_ids,
            neighbours: Vec::new(),
            portals: Vec::new(),
            centroid,
        }
    }

    /// Returns the shared edge leading to the neighbour with local id `neighbour`
    pub fn portal_to(&self, neighbour: usize) -> Option<[usize; 2]> {
        self.neighbours
            .iter()
            .position(|&n| n == neighbour)
            .and_then(|i| self.portals.get(i).copied())
    }
}

/// A connected set of nodes, indexed by local node id
pub type Group = Vec<Node>;

/// Immutable pathfinding dataset for one mesh
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Zone {
    vertices: Vec<Vec3>,
    groups: Vec<Group>,
}

impl Zone {
    /// Assembles a zone from already lowered parts.
    ///
    /// The parts are taken as-is; call [`Zone::validate`] when they come from
    /// an untrusted source.
    pub fn from_parts(vertices: Vec<Vec3>, groups: Vec<Group>) -> Self {
        Self { vertices, groups }
    }

    /// Welded (and rounded) vertex positions
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// All groups, in construction order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns the group with the given id
    pub fn group(&self, group_id: usize) -> Option<&[Node]> {
        self.groups.get(group_id).map(Vec::as_slice)
    }

    /// Returns a node by group id and local node id
    pub fn node(&self, group_id: usize, node_id: usize) -> Option<&Node> {
        self.groups.get(group_id)?.get(node_id)
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of nodes across all groups
    pub fn node_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Vertex positions of a node's triangle
    pub fn triangle(&self, node: &Node) -> Option<[Vec3; 3]> {
        let [a, b, c] = node.vertex_ids;
        Some([
            *self.vertices.get(a)?,
            *self.vertices.get(b)?,
            *self.vertices.get(c)?,
        ])
    }

    /// Checks internal consistency: vertex ids in range, node ids matching
    /// their position, neighbour ids in range, one portal per neighbour, and
    /// portals made of the node's own vertices.
    pub fn validate(&self) -> Result<()> {
        let vert_count = self.vertices.len();

        for (group_id, group) in self.groups.iter().enumerate() {
            for (local_id, node) in group.iter().enumerate() {
                let at = || format!("group {} node {}", group_id, local_id);

                if node.id != local_id || node.group != group_id {
                    return Err(Error::InvalidZone(format!(
                        "{} is labelled ({}, {})",
                        at(),
                        node.group,
                        node.id
                    )));
                }

                if node.vertex_ids.iter().any(|&v| v >= vert_count) {
                    return Err(Error::InvalidZone(format!(
                        "{} references a vertex out of range",
                        at()
                    )));
                }

                if node.neighbours.len() != node.portals.len() {
                    return Err(Error::InvalidZone(format!(
                        "{} has {} neighbours but {} portals",
                        at(),
                        node.neighbours.len(),
                        node.portals.len()
                    )));
                }

                if node.neighbours.iter().any(|&n| n >= group.len()) {
                    return Err(Error::InvalidZone(format!(
                        "{} has a neighbour outside its group",
                        at()
                    )));
                }

                let owns = |v: usize| node.vertex_ids.contains(&v);
                if node.portals.iter().any(|p| !owns(p[0]) || !owns(p[1])) {
                    return Err(Error::InvalidZone(format!(
                        "{} has a portal that is not one of its edges",
                        at()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Serializes the zone to JSON bytes
    #[cfg(feature = "serialization")]
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserializes and validates a zone from JSON bytes
    #[cfg(feature = "serialization")]
    pub fn from_json_bytes(data: &[u8]) -> Result<Self> {
        let zone: Self =
            serde_json::from_slice(data).map_err(|e| Error::Serialization(e.to_string()))?;
        zone.validate()?;
        Ok(zone)
    }

    /// Saves the zone to a file in JSON format
    #[cfg(feature = "serialization")]
    pub fn save_to_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))?;
        std::fs::write(path.as_ref(), json)?;
        log::debug!(
            "Saved zone ({} groups, {} nodes) to {}",
            self.group_count(),
            self.node_count(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Loads and validates a zone from a JSON file
    #[cfg(feature = "serialization")]
    pub fn load_from_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read(path.as_ref())?;
        let zone = Self::from_json_bytes(&json)?;
        log::debug!(
            "Loaded zone ({} groups, {} nodes) from {}",
            zone.group_count(),
            zone.node_count(),
            path.as_ref().display()
        );
        Ok(zone)
    }
}
