use std::collections::BTreeMap;

use crate::infra::{CavernError, NodeId, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    gold: u32,
}

impl Node {
    pub fn gold(&self) -> u32 {
        self.gold
    }
}

/// Undirected weighted graph of cavern nodes.
///
/// Nodes and adjacency lists are kept in id order so every iteration over the
/// cavern is deterministic.
#[derive(Clone, Debug, Default)]
pub struct Cavern {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<NodeId, BTreeMap<NodeId, u32>>,
}

impl Cavern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        id: NodeId,
        position: Position,
        gold: u32,
    ) -> Result<(), CavernError> {
        if self.nodes.contains_key(&id) {
            return Err(CavernError::DuplicateNode { id });
        }
        self.nodes.insert(id, Node { id, position, gold });
        self.edges.insert(id, BTreeMap::new());
        Ok(())
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: u32) -> Result<(), CavernError> {
        if !self.nodes.contains_key(&a) {
            return Err(CavernError::UnknownNode { id: a });
        }
        if !self.nodes.contains_key(&b) {
            return Err(CavernError::UnknownNode { id: b });
        }
        if a == b || weight == 0 {
            return Err(CavernError::InvalidEdge {
                from: a,
                to: b,
                weight,
            });
        }
        self.edges.entry(a).or_default().insert(b, weight);
        self.edges.entry(b).or_default().insert(a, weight);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Neighbours of `id` with the weight of the connecting edge.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.edges
            .get(&id)
            .into_iter()
            .flat_map(|adjacent| adjacent.iter().map(|(&to, &weight)| (to, weight)))
    }

    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<u32> {
        self.edges.get(&a)?.get(&b).copied()
    }

    pub fn gold(&self, id: NodeId) -> u32 {
        self.nodes.get(&id).map_or(0, |node| node.gold)
    }

    /// Remove all gold from a node, returning how much was there.
    pub fn take_gold(&mut self, id: NodeId) -> u32 {
        self.nodes
            .get_mut(&id)
            .map_or(0, |node| std::mem::take(&mut node.gold))
    }

    pub fn total_gold(&self) -> u32 {
        self.nodes
            .values()
            .fold(0, |total: u32, node| total.saturating_add(node.gold))
    }

    /// Wall-agnostic distance between two nodes.
    pub fn heuristic_distance(&self, a: NodeId, b: NodeId) -> Option<u32> {
        let from = self.nodes.get(&a)?;
        let to = self.nodes.get(&b)?;
        Some(from.position.distance(&to.position))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum::<usize>() / 2
    }
}
