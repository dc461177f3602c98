use crate::game::RunOutcome;
use crate::infra::{NodeId, Phase};

/// Trait for observing cavern events during a run
pub trait CavernObserver {
    /// Called once a level has been generated, before the hunt starts
    fn on_level_start(&mut self, seed: Option<u64>, node_count: usize, budget: u32);

    /// Called when a phase begins at `start`
    fn on_phase_start(&mut self, phase: Phase, start: NodeId);

    /// Called for every edge the agent walks
    fn on_move(&mut self, phase: Phase, from: NodeId, to: NodeId, weight: u32);

    /// Called when gold is picked up
    fn on_gold_collected(&mut self, _at: NodeId, _amount: u32, _steps_remaining: u32) {
        // Default implementation does nothing
    }

    /// Called when a phase ends, successfully or not
    fn on_phase_finished(&mut self, phase: Phase, success: bool, steps: u32);

    /// Called when the whole run is over
    fn on_game_finished(&mut self, outcome: &RunOutcome);
}

/// Observer that ignores every event.
pub struct NullObserver;

impl CavernObserver for NullObserver {
    fn on_level_start(&mut self, _seed: Option<u64>, _node_count: usize, _budget: u32) {}

    fn on_phase_start(&mut self, _phase: Phase, _start: NodeId) {}

    fn on_move(&mut self, _phase: Phase, _from: NodeId, _to: NodeId, _weight: u32) {}

    fn on_phase_finished(&mut self, _phase: Phase, _success: bool, _steps: u32) {}

    fn on_game_finished(&mut self, _outcome: &RunOutcome) {}
}
