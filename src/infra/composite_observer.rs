use crate::game::RunOutcome;
use crate::infra::{CavernObserver, NodeId, Phase};

pub struct CompositeObserver {
    observers: Vec<Box<dyn CavernObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn CavernObserver>>) -> Self {
        Self { observers }
    }
}

impl CavernObserver for CompositeObserver {
    fn on_level_start(&mut self, seed: Option<u64>, node_count: usize, budget: u32) {
        for observer in &mut self.observers {
            observer.on_level_start(seed, node_count, budget);
        }
    }

    fn on_phase_start(&mut self, phase: Phase, start: NodeId) {
        for observer in &mut self.observers {
            observer.on_phase_start(phase, start);
        }
    }

    fn on_move(&mut self, phase: Phase, from: NodeId, to: NodeId, weight: u32) {
        for observer in &mut self.observers {
            observer.on_move(phase, from, to, weight);
        }
    }

    fn on_gold_collected(&mut self, at: NodeId, amount: u32, steps_remaining: u32) {
        for observer in &mut self.observers {
            observer.on_gold_collected(at, amount, steps_remaining);
        }
    }

    fn on_phase_finished(&mut self, phase: Phase, success: bool, steps: u32) {
        for observer in &mut self.observers {
            observer.on_phase_finished(phase, success, steps);
        }
    }

    fn on_game_finished(&mut self, outcome: &RunOutcome) {
        for observer in &mut self.observers {
            observer.on_game_finished(outcome);
        }
    }
}
