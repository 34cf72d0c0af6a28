//! A* search over the nodes of one group

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use navzone_common::{distance, Node};

/// Search state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Unvisited,
    Open,
    Closed,
}

/// Per-node bookkeeping, indexed by local node id
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    state: NodeState,
    parent: Option<usize>,
    /// Cost from the start node
    g: f32,
}

/// Node wrapper for the binary heap (priority queue)
#[derive(Debug, Clone, Copy)]
struct HeapNode {
    index: usize,
    /// Total cost (f value)
    f: f32,
    /// Discovery sequence, breaks ties in favour of the earliest push
    order: usize,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapNode {}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap on f, then on discovery order
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Finds the cheapest node corridor from `start` to `goal` within `group`.
///
/// Edge cost is the distance between adjacent centroids and the heuristic is
/// the straight-line distance to the goal centroid. The corridor excludes
/// `start` and ends with `goal`; it is empty when `start == goal`, when either
/// id is out of range, or when the goal cannot be reached.
pub fn find_corridor(group: &[Node], start: usize, goal: usize) -> Vec<usize> {
    if start >= group.len() || goal >= group.len() || start == goal {
        return Vec::new();
    }

    let goal_centroid = group[goal].centroid;
    let heuristic = |index: usize| distance(&group[index].centroid, &goal_centroid);

    let mut nodes = vec![
        SearchNode {
            state: NodeState::Unvisited,
            parent: None,
            g: 0.0,
        };
        group.len()
    ];
    let mut open_list = BinaryHeap::new();
    let mut order = 0;

    nodes[start].state = NodeState::Open;
    open_list.push(HeapNode {
        index: start,
        f: heuristic(start),
        order,
    });

    while let Some(HeapNode { index: current, .. }) = open_list.pop() {
        // Skip entries superseded by a cheaper push
        if nodes[current].state == NodeState::Closed {
            continue;
        }
        nodes[current].state = NodeState::Closed;

        if current == goal {
            return walk_back(&nodes, start, goal);
        }

        let current_node = &group[current];
        for &neighbour in &current_node.neighbours {
            if neighbour >= group.len() || nodes[neighbour].state == NodeState::Closed {
                continue;
            }

            let g = nodes[current].g + distance(&current_node.centroid, &group[neighbour].centroid);
            let seen = nodes[neighbour].state == NodeState::Open;
            if seen && g >= nodes[neighbour].g {
                continue;
            }

            nodes[neighbour] = SearchNode {
                state: NodeState::Open,
                parent: Some(current),
                g,
            };
            order += 1;
            open_list.push(HeapNode {
                index: neighbour,
                f: g + heuristic(neighbour),
                order,
            });
        }
    }

    log::debug!(
        "No corridor from node {} to node {} in a group of {}",
        start,
        goal,
        group.len()
    );
    Vec::new()
}

/// Follows parent links from `goal` back to `start`, excluding `start`
fn walk_back(nodes: &[SearchNode], start: usize, goal: usize) -> Vec<usize> {
    let mut corridor = Vec::new();
    let mut current = goal;
    while current != start {
        corridor.push(current);
        match nodes[current].parent {
            Some(parent) => current = parent,
            None => break,
        }
    }
    corridor.reverse();
    corridor
}
