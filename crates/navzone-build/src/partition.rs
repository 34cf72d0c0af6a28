//! Connected group assignment
//!
//! Nodes are visited in global order. An unassigned node opens a new group and
//! a breadth-first flood fill labels everything reachable from it. Local ids
//! are handed out in global scan order, so within a group nodes keep the
//! relative order they had in the input.

use std::collections::VecDeque;

use crate::graph::MeshGraph;

/// Result of partitioning a [`MeshGraph`] into connected groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Local id of every global node within its group
    pub local_of: Vec<usize>,
    /// Global node ids of each group, indexed by local id
    pub groups: Vec<Vec<usize>>,
}

impl Partition {
    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Splits the graph into connected groups
pub fn partition_groups(graph: &MeshGraph) -> Partition {
    let node_count = graph.nodes.len();
    let mut group_of: Vec<Option<usize>> = vec![None; node_count];
    let mut local_of = vec![0; node_count];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..node_count {
        if let Some(group) = group_of[start] {
            local_of[start] = groups[group].len();
            groups[group].push(start);
            continue;
        }

        let group = groups.len();
        groups.push(vec![start]);
        group_of[start] = Some(group);

        queue.clear();
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            for &next in &graph.nodes[current].neighbours {
                if group_of[next].is_none() {
                    group_of[next] = Some(group);
                    queue.push_back(next);
                }
            }
        }
    }

    Partition { local_of, groups }
}
