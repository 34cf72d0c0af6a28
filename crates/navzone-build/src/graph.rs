//! Triangle adjacency
//!
//! Two triangles are neighbours when they share two vertex indices. Each link
//! is stored on both sides together with the shared edge (the portal).

use crate::weld::WeldedGeometry;

/// One triangle of the intermediate graph, before groups are assigned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphNode {
    /// Welded vertex indices in input winding order
    pub vertex_ids: [u32; 3],
    /// Global ids of adjacent nodes
    pub neighbours: Vec<usize>,
    /// Shared edge per entry of `neighbours`
    pub portals: Vec<[u32; 2]>,
}

impl GraphNode {
    fn new(vertex_ids: [u32; 3]) -> Self {
        Self {
            vertex_ids,
            neighbours: Vec::new(),
            portals: Vec::new(),
        }
    }
}

/// Triangle graph over a welded mesh, indexed by global node id
#[derive(Debug, Clone, Default)]
pub struct MeshGraph {
    pub nodes: Vec<GraphNode>,
}

impl MeshGraph {
    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected links
    pub fn link_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbours.len()).sum::<usize>() / 2
    }

    /// Records a link between `a` and `b` on both nodes unless it already exists
    fn bind(&mut self, a: usize, b: usize, portal: [u32; 2]) {
        if a == b || self.nodes[a].neighbours.contains(&b) {
            return;
        }

        self.nodes[a].neighbours.push(b);
        self.nodes[a].portals.push(portal);
        self.nodes[b].neighbours.push(a);
        self.nodes[b].portals.push(portal);
    }
}

/// Builds one node per triangle and links triangles that share an edge.
///
/// A per-vertex bucket of incident triangles keeps the search local to each
/// triangle's corners. An edge shared by more than two triangles links every
/// pair of them.
pub fn build_mesh_graph(geometry: &WeldedGeometry) -> MeshGraph {
    let mut graph = MeshGraph {
        nodes: (0..geometry.tri_count())
            .map(|i| GraphNode::new(geometry.triangle(i)))
            .collect(),
    };

    // Triangles touching each vertex
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); geometry.vertices.len()];
    for (i, node) in graph.nodes.iter().enumerate() {
        for &v in &node.vertex_ids {
            let bucket = &mut buckets[v as usize];
            if bucket.last() != Some(&i) {
                bucket.push(i);
            }
        }
    }

    for i in 0..graph.nodes.len() {
        let [a, b, c] = graph.nodes[i].vertex_ids;

        for &j in &buckets[a as usize] {
            if j == i {
                continue;
            }
            if buckets[b as usize].contains(&j) {
                graph.bind(i, j, [a, b]);
            }
            if buckets[c as usize].contains(&j) {
                graph.bind(i, j, [a, c]);
            }
        }

        for &j in &buckets[b as usize] {
            if j == i {
                continue;
            }
            if buckets[c as usize].contains(&j) {
                graph.bind(i, j, [b, c]);
            }
        }
    }

    graph
}
