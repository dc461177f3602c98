use crate::infra::{CavernError, CavernObserver, NodeId, NodeStatus, Phase};
use crate::state::Cavern;

/// Local view of the cavern while hunting for the orb.
///
/// Only the current node and its direct neighbours are visible, each with a
/// wall-agnostic distance to the orb.
pub trait HuntState {
    fn current_location(&self) -> NodeId;

    fn neighbors(&self) -> Vec<NodeStatus>;

    /// Zero exactly when standing on the orb.
    fn distance_to_orb(&self) -> u32;

    /// Move to a direct neighbour of the current node.
    fn move_to(&mut self, id: NodeId) -> Result<(), CavernError>;
}

pub struct HuntSession<'a> {
    cavern: &'a Cavern,
    orb: NodeId,
    position: NodeId,
    steps: u32,
    moves: usize,
    observer: &'a mut dyn CavernObserver,
}

impl<'a> HuntSession<'a> {
    pub fn new(
        cavern: &'a Cavern,
        start: NodeId,
        orb: NodeId,
        observer: &'a mut dyn CavernObserver,
    ) -> Result<Self, CavernError> {
        for id in [start, orb] {
            if !cavern.contains(id) {
                return Err(CavernError::UnknownNode { id });
            }
        }
        Ok(Self {
            cavern,
            orb,
            position: start,
            steps: 0,
            moves: 0,
            observer,
        })
    }

    /// Total edge weight walked so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    fn distance_from(&self, id: NodeId) -> u32 {
        if id == self.orb {
            return 0;
        }
        // Two nodes may share a position; only the orb itself reads as zero.
        self.cavern
            .heuristic_distance(id, self.orb)
            .map_or(u32::MAX, |d| d.max(1))
    }
}

impl HuntState for HuntSession<'_> {
    fn current_location(&self) -> NodeId {
        self.position
    }

    fn neighbors(&self) -> Vec<NodeStatus> {
        self.cavern
            .neighbors(self.position)
            .map(|(id, _)| NodeStatus::new(id, self.distance_from(id)))
            .collect()
    }

    fn distance_to_orb(&self) -> u32 {
        self.distance_from(self.position)
    }

    fn move_to(&mut self, id: NodeId) -> Result<(), CavernError> {
        let from = self.position;
        let weight = self
            .cavern
            .edge_weight(from, id)
            .ok_or(CavernError::NotAdjacent { from, to: id })?;
        self.position = id;
        self.steps += weight;
        self.moves += 1;
        self.observer.on_move(Phase::Hunt, from, id, weight);
        Ok(())
    }
}
