//! Zone generation for navmesh pathfinding
//!
//! Turns an arbitrary triangle mesh into a [`Zone`]: vertices are welded,
//! triangles that share an edge are linked, and the resulting graph is split
//! into connected groups.

mod config;
mod context;
mod graph;
mod partition;
mod weld;

pub use config::{ZoneConfig, DEFAULT_WELD_TOLERANCE, MAX_ROUND_DECIMALS};
pub use context::{BuildContext, BuildStage, BuildStats, LogEntry, LogLevel, TimerEntry};
pub use graph::{build_mesh_graph, GraphNode, MeshGraph};
pub use partition::{partition_groups, Partition};
pub use weld::{weld_vertices, WeldedGeometry};

use navzone_common::{round_vec3, triangle_area, triangle_centroid, Node, TriMesh, Zone};

/// Builder for zones
#[derive(Debug, Clone, Default)]
pub struct ZoneBuilder {
    /// Configuration for zone generation
    config: ZoneConfig,
}

impl ZoneBuilder {
    /// Creates a new ZoneBuilder with the specified configuration
    pub fn new(config: ZoneConfig) -> Self {
        Self { config }
    }

    /// Gets a reference to the configuration
    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    /// Builds a zone from the input mesh
    pub fn build(&self, mesh: &TriMesh) -> navzone_common::Result<Zone> {
        let mut context = BuildContext::new();
        context.set_timing_enabled(false);
        self.build_with_context(mesh, &mut context)
    }

    /// Builds a zone from the input mesh, recording timings, messages and
    /// statistics in `context`
    pub fn build_with_context(
        &self,
        mesh: &TriMesh,
        context: &mut BuildContext,
    ) -> navzone_common::Result<Zone> {
        context.start_timer(BuildStage::Total);
        let result = self.run_stages(mesh, context);
        context.stop_timer(BuildStage::Total);
        result
    }

    fn run_stages(
        &self,
        mesh: &TriMesh,
        context: &mut BuildContext,
    ) -> navzone_common::Result<Zone> {
        self.config.validate()?;
        mesh.validate()?;

        context.start_timer(BuildStage::Weld);
        let welded = weld_vertices(mesh, self.config.weld_tolerance);
        context.stop_timer(BuildStage::Weld);
        let mut welded = welded?;
        context.log_debug(format!(
            "Welded {} vertices into {} (tolerance {})",
            mesh.vert_count(),
            welded.vertices.len(),
            self.config.weld_tolerance
        ));

        let discarded = if self.config.discard_degenerate {
            self.discard_degenerate(&mut welded, context)
        } else {
            0
        };

        context.start_timer(BuildStage::Graph);
        let graph = build_mesh_graph(&welded);
        context.stop_timer(BuildStage::Graph);
        context.log_debug(format!(
            "Linked {} triangles with {} shared edges",
            graph.node_count(),
            graph.link_count()
        ));

        context.start_timer(BuildStage::Partition);
        let partition = partition_groups(&graph);
        context.stop_timer(BuildStage::Partition);
        context.log_debug(format!(
            "Partitioned {} nodes into {} groups",
            graph.node_count(),
            partition.group_count()
        ));

        context.start_timer(BuildStage::Lower);
        let zone = self.lower(&welded, &graph, &partition);
        context.stop_timer(BuildStage::Lower);

        let stats = BuildStats {
            input_vertices: mesh.vert_count(),
            welded_vertices: zone.vertices().len(),
            input_triangles: mesh.tri_count(),
            discarded_triangles: discarded,
            nodes: zone.node_count(),
            links: graph.link_count(),
            groups: zone.group_count(),
        };
        context.log_info(format!(
            "Built zone: {} nodes in {} groups from {} triangles",
            stats.nodes, stats.groups, stats.input_triangles
        ));
        context.set_stats(stats);

        Ok(zone)
    }

    /// Removes triangles with repeated corners or zero area, returning how
    /// many were dropped
    fn discard_degenerate(&self, welded: &mut WeldedGeometry, context: &mut BuildContext) -> usize {
        let vertices = &welded.vertices;
        let kept: Vec<u32> = welded
            .indices
            .chunks_exact(3)
            .filter(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]];
                if a == b || b == c || a == c {
                    return false;
                }
                let corners = [
                    vertices[a as usize],
                    vertices[b as usize],
                    vertices[c as usize],
                ];
                triangle_area(&corners) > 0.0
            })
            .flatten()
            .copied()
            .collect();

        let discarded = (welded.indices.len() - kept.len()) / 3;
        if discarded > 0 {
            context.log_warning(format!("Discarded {} degenerate triangles", discarded));
        }
        welded.indices = kept;
        discarded
    }

    /// Rounds vertices, computes centroids and rewrites neighbour ids to
    /// group-local ids
    fn lower(&self, welded: &WeldedGeometry, graph: &MeshGraph, partition: &Partition) -> Zone {
        let decimals = self.config.round_decimals;
        let vertices: Vec<_> = welded
            .vertices
            .iter()
            .map(|&v| round_vec3(v, decimals))
            .collect();

        let groups = partition
            .groups
            .iter()
            .enumerate()
            .map(|(group_id, members)| {
                members
                    .iter()
                    .enumerate()
                    .map(|(local_id, &global)| {
                        let source = &graph.nodes[global];
                        let vertex_ids = source.vertex_ids.map(|v| v as usize);
                        let corners = vertex_ids.map(|v| vertices[v]);
                        let centroid = round_vec3(triangle_centroid(&corners), decimals);

                        let mut node = Node::new(local_id, group_id, vertex_ids, centroid);
                        node.neighbours = source
                            .neighbours
                            .iter()
                            .map(|&n| partition.local_of[n])
                            .collect();
                        node.portals = source
                            .portals
                            .iter()
                            .map(|p| [p[0] as usize, p[1] as usize])
                            .collect();
                        node
                    })
                    .collect()
            })
            .collect();

        Zone::from_parts(vertices, groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use navzone_common::Error;

    fn strip(cells: usize) -> TriMesh {
        // Row of unit squares along +X, two triangles each
        let mut points = Vec::new();
        for i in 0..=cells {
            points.push(Vec3::new(i as f32, 0.0, 0.0));
            points.push(Vec3::new(i as f32, 0.0, 1.0));
        }
        let mut indices = Vec::new();
        for i in 0..cells as u32 {
            let (a, b, c, d) = (i * 2, i * 2 + 1, i * 2 + 2, i * 2 + 3);
            indices.extend_from_slice(&[a, b, c, c, b, d]);
        }
        TriMesh::from_points(&points, indices)
    }

    #[test]
    fn test_build_strip() {
        let zone = ZoneBuilder::default().build(&strip(3)).unwrap();
        assert_eq!(zone.group_count(), 1);
        assert_eq!(zone.node_count(), 6);
        assert_eq!(zone.vertices().len(), 8);
        assert!(zone.validate().is_ok());

        let group = zone.group(0).unwrap();
        // Interior triangles have two neighbours, the ends only one
        assert_eq!(group[0].neighbours, vec![1]);
        assert_eq!(group[1].neighbours.len(), 2);
        assert_eq!(group[5].neighbours, vec![4]);
    }

    #[test]
    fn test_centroids_are_rounded() {
        let zone = ZoneBuilder::default().build(&strip(1)).unwrap();
        let node = zone.node(0, 0).unwrap();
        assert_eq!(node.centroid, Vec3::new(0.33, 0.0, 0.33));
    }

    #[test]
    fn test_vertices_are_rounded() {
        let mesh = TriMesh::from_points(
            &[
                Vec3::new(0.004, 1.006, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            vec![0, 1, 2],
        );
        let zone = ZoneBuilder::default().build(&mesh).unwrap();
        assert_eq!(zone.vertices()[0], Vec3::new(0.0, 1.01, 0.0));
    }

    #[test]
    fn test_neighbours_use_local_ids() {
        // Two separate quads, triangles interleaved in the input
        let mesh = TriMesh::from_points(
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
        );
        let zone = ZoneBuilder::default().build(&mesh).unwrap();
        assert_eq!(zone.group_count(), 2);
        for group in zone.groups() {
            assert_eq!(group.len(), 2);
            assert_eq!(group[0].neighbours, vec![1]);
            assert_eq!(group[1].neighbours, vec![0]);
        }
        assert!(zone.validate().is_ok());
    }

    #[test]
    fn test_build_with_context_records_stats() {
        let mut context = BuildContext::new();
        let zone = ZoneBuilder::default()
            .build_with_context(&strip(2), &mut context)
            .unwrap();

        let stats = context.stats().copied().unwrap();
        assert_eq!(stats.input_vertices, 6);
        assert_eq!(stats.input_triangles, 4);
        assert_eq!(stats.nodes, zone.node_count());
        assert_eq!(stats.links, 3);
        assert_eq!(stats.groups, 1);
        assert_eq!(context.timer_count(BuildStage::Total), 1);
        assert_eq!(context.timer_count(BuildStage::Weld), 1);
        assert!(!context.logs_by_level(LogLevel::Info).is_empty());
    }

    #[test]
    fn test_stage_summaries_logged_once() {
        let mut context = BuildContext::new();
        context.set_log_level(LogLevel::Debug);
        ZoneBuilder::default()
            .build_with_context(&strip(2), &mut context)
            .unwrap();

        let debug: Vec<&str> = context
            .logs_by_level(LogLevel::Debug)
            .iter()
            .map(|entry| entry.message.as_str())
            .collect();
        assert_eq!(debug.len(), 3);
        assert!(debug[0].starts_with("Welded 6 vertices into 6"));
        assert!(debug[1].starts_with("Linked 4 triangles"));
        assert!(debug[2].starts_with("Partitioned 4 nodes into 1 groups"));
    }

    #[test]
    fn test_degenerate_triangles_kept_by_default() {
        let mesh = TriMesh::from_points(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.00001, 0.0, 0.0),
            ],
            vec![0, 1, 2, 0, 1, 3],
        );
        let zone = ZoneBuilder::default().build(&mesh).unwrap();
        assert_eq!(zone.node_count(), 2);
    }

    #[test]
    fn test_discard_degenerate() {
        let mesh = TriMesh::from_points(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.00001, 0.0, 0.0),
            ],
            vec![0, 1, 2, 0, 1, 3],
        );
        let config = ZoneConfig {
            discard_degenerate: true,
            ..ZoneConfig::default()
        };
        let mut context = BuildContext::new();
        let zone = ZoneBuilder::new(config)
            .build_with_context(&mesh, &mut context)
            .unwrap();

        assert_eq!(zone.node_count(), 1);
        assert_eq!(context.stats().map(|s| s.discarded_triangles), Some(1));
        assert_eq!(context.logs_by_level(LogLevel::Warning).len(), 1);
    }

    #[test]
    fn test_empty_mesh_builds_empty_zone() {
        let zone = ZoneBuilder::default().build(&TriMesh::new()).unwrap();
        assert_eq!(zone.group_count(), 0);
        assert!(zone.vertices().is_empty());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut mesh = strip(1);
        mesh.indices.push(0);
        assert!(matches!(
            ZoneBuilder::default().build(&mesh),
            Err(Error::InvalidMesh(_))
        ));

        let builder = ZoneBuilder::new(ZoneConfig::with_tolerance(0.0));
        assert!(matches!(
            builder.build(&strip(1)),
            Err(Error::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_every_node_belongs_to_one_group() {
        let zone = ZoneBuilder::default().build(&strip(4)).unwrap();
        for (group_id, group) in zone.groups().iter().enumerate() {
            for (local_id, node) in group.iter().enumerate() {
                assert_eq!(node.group, group_id);
                assert_eq!(node.id, local_id);
            }
        }
        assert_eq!(zone.node_count(), 8);
    }
}
