use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::infra::NodeId;
use crate::state::Cavern;

/// Shortest paths over a fully known cavern.
pub trait PathOracle {
    /// Minimum-cost path from `from` to `to`, both ends included.
    /// Returns `None` when the nodes are not connected.
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>>;

    /// Sum of the edge weights along `path`, widened so long paths cannot wrap.
    /// Returns `None` when two consecutive nodes are not adjacent.
    fn path_cost(&self, path: &[NodeId]) -> Option<u64>;
}

#[derive(Clone, Eq, PartialEq)]
struct Entry {
    id: NodeId,
    cost: u64,
}

// Min-heap on cost; lower id pops first on equal cost.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct Dijkstra;

impl Dijkstra {
    pub fn find_path(cavern: &Cavern, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
        if !cavern.contains(start) || !cavern.contains(goal) {
            return None;
        }
        if start == goal {
            return Some(vec![goal]);
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
        let mut g_score: HashMap<NodeId, u64> = HashMap::new();
        let mut closed_set: HashSet<NodeId> = HashSet::new();

        g_score.insert(start, 0);
        open_set.push(Entry { id: start, cost: 0 });

        while let Some(Entry { id: current, cost }) = open_set.pop() {
            if current == goal {
                return Some(reconstruct_path(&came_from, current));
            }

            if !closed_set.insert(current) {
                continue;
            }

            for (neighbor, weight) in cavern.neighbors(current) {
                if closed_set.contains(&neighbor) {
                    continue;
                }

                let tentative_g = cost + u64::from(weight);
                if g_score
                    .get(&neighbor)
                    .is_none_or(|&known| tentative_g < known)
                {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    open_set.push(Entry {
                        id: neighbor,
                        cost: tentative_g,
                    });
                }
            }
        }

        None
    }

    pub fn path_cost(cavern: &Cavern, path: &[NodeId]) -> Option<u64> {
        path.windows(2)
            .map(|step| cavern.edge_weight(step[0], step[1]).map(u64::from))
            .sum()
    }
}

impl PathOracle for Cavern {
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        Dijkstra::find_path(self, from, to)
    }

    fn path_cost(&self, path: &[NodeId]) -> Option<u64> {
        Dijkstra::path_cost(self, path)
    }
}

fn reconstruct_path(came_from: &HashMap<NodeId, NodeId>, mut current: NodeId) -> Vec<NodeId> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Position;

    /// 0 -1- 1 -1- 2
    ///  \         /
    ///   ----5----
    fn triangle() -> Cavern {
        let mut cavern = Cavern::new();
        for i in 0..4 {
            cavern
                .add_node(NodeId(i), Position::new(i as i32, 0), 0)
                .unwrap();
        }
        cavern.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        cavern.add_edge(NodeId(1), NodeId(2), 1).unwrap();
        cavern.add_edge(NodeId(0), NodeId(2), 5).unwrap();
        cavern
    }

    #[test]
    fn test_prefers_cheaper_longer_path() {
        let cavern = triangle();
        let path = cavern.shortest_path(NodeId(0), NodeId(2)).unwrap();
        assert_eq!(path, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(cavern.path_cost(&path), Some(2));
    }

    #[test]
    fn test_same_node_path() {
        let cavern = triangle();
        let path = cavern.shortest_path(NodeId(1), NodeId(1)).unwrap();
        assert_eq!(path, vec![NodeId(1)]);
        assert_eq!(cavern.path_cost(&path), Some(0));
    }

    #[test]
    fn test_disconnected_node_has_no_path() {
        let cavern = triangle();
        assert_eq!(cavern.shortest_path(NodeId(0), NodeId(3)), None);
        assert_eq!(cavern.shortest_path(NodeId(0), NodeId(99)), None);
    }

    #[test]
    fn test_path_cost_rejects_non_adjacent_steps() {
        let cavern = triangle();
        assert_eq!(cavern.path_cost(&[NodeId(0), NodeId(3)]), None);
        assert_eq!(cavern.path_cost(&[NodeId(0), NodeId(2), NodeId(1)]), Some(6));
    }

    #[test]
    fn test_equal_cost_paths_are_reproducible() {
        // Square 0-1-3 and 0-2-3 with identical weights.
        let mut cavern = Cavern::new();
        for i in 0..4 {
            cavern.add_node(NodeId(i), Position::new(0, 0), 0).unwrap();
        }
        cavern.add_edge(NodeId(0), NodeId(1), 2).unwrap();
        cavern.add_edge(NodeId(0), NodeId(2), 2).unwrap();
        cavern.add_edge(NodeId(1), NodeId(3), 2).unwrap();
        cavern.add_edge(NodeId(2), NodeId(3), 2).unwrap();

        let first = cavern.shortest_path(NodeId(0), NodeId(3)).unwrap();
        for _ in 0..10 {
            assert_eq!(cavern.shortest_path(NodeId(0), NodeId(3)).unwrap(), first);
        }
        assert_eq!(cavern.path_cost(&first), Some(4));
    }

    #[test]
    fn test_heavy_edges_stay_connected() {
        // Total weight does not fit in a u32.
        let mut cavern = Cavern::new();
        for i in 0..3 {
            cavern.add_node(NodeId(i), Position::new(i as i32, 0), 0).unwrap();
        }
        cavern.add_edge(NodeId(0), NodeId(1), 3_000_000_000).unwrap();
        cavern.add_edge(NodeId(1), NodeId(2), 3_000_000_000).unwrap();

        let path = cavern.shortest_path(NodeId(0), NodeId(2)).unwrap();
        assert_eq!(path, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(cavern.path_cost(&path), Some(6_000_000_000));
    }
}
