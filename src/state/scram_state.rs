use crate::infra::{CavernError, CavernObserver, NodeId, Phase};
use crate::state::Cavern;

/// Full view of the cavern while escaping before the ceiling collapses.
pub trait ScramState {
    /// The whole graph, gold included. Also serves as the path oracle.
    fn cavern(&self) -> &Cavern;

    fn current_node(&self) -> NodeId;

    fn exit(&self) -> NodeId;

    fn steps_remaining(&self) -> u32;

    /// Move to a direct neighbour, spending the edge weight from the budget.
    fn move_to(&mut self, id: NodeId) -> Result<(), CavernError>;

    /// Pick up all gold on the current node, returning the amount.
    fn pick_up_gold(&mut self) -> Result<u32, CavernError>;
}

pub struct ScramSession<'a> {
    cavern: &'a mut Cavern,
    exit: NodeId,
    position: NodeId,
    steps_remaining: u32,
    gold_collected: u32,
    observer: &'a mut dyn CavernObserver,
}

impl<'a> ScramSession<'a> {
    pub fn new(
        cavern: &'a mut Cavern,
        start: NodeId,
        exit: NodeId,
        budget: u32,
        observer: &'a mut dyn CavernObserver,
    ) -> Result<Self, CavernError> {
        for id in [start, exit] {
            if !cavern.contains(id) {
                return Err(CavernError::UnknownNode { id });
            }
        }
        Ok(Self {
            cavern,
            exit,
            position: start,
            steps_remaining: budget,
            gold_collected: 0,
            observer,
        })
    }

    pub fn gold_collected(&self) -> u32 {
        self.gold_collected
    }

    pub fn is_at_exit(&self) -> bool {
        self.position == self.exit
    }
}

impl ScramState for ScramSession<'_> {
    fn cavern(&self) -> &Cavern {
        &*self.cavern
    }

    fn current_node(&self) -> NodeId {
        self.position
    }

    fn exit(&self) -> NodeId {
        self.exit
    }

    fn steps_remaining(&self) -> u32 {
        self.steps_remaining
    }

    fn move_to(&mut self, id: NodeId) -> Result<(), CavernError> {
        let from = self.position;
        let weight = self
            .cavern
            .edge_weight(from, id)
            .ok_or(CavernError::NotAdjacent { from, to: id })?;
        self.steps_remaining = self
            .steps_remaining
            .checked_sub(weight)
            .ok_or(CavernError::Collapsed {
                at: from,
                needed: weight,
                remaining: self.steps_remaining,
            })?;
        self.position = id;
        self.observer.on_move(Phase::Scram, from, id, weight);
        Ok(())
    }

    fn pick_up_gold(&mut self) -> Result<u32, CavernError> {
        let amount = self.cavern.take_gold(self.position);
        if amount == 0 {
            return Err(CavernError::NoGold { at: self.position });
        }
        self.gold_collected = self.gold_collected.saturating_add(amount);
        self.observer
            .on_gold_collected(self.position, amount, self.steps_remaining);
        Ok(amount)
    }
}
