use tracing::{debug, info, warn};

use crate::game::RunOutcome;
use crate::infra::{CavernObserver, NodeId, Phase};

pub struct DefaultObserver;

impl CavernObserver for DefaultObserver {
    fn on_level_start(&mut self, seed: Option<u64>, node_count: usize, budget: u32) {
        info!("Level started");
        if let Some(seed) = seed {
            info!("- seed: {}", seed);
        }
        info!("- nodes: {}", node_count);
        info!("- scram budget: {}", budget);
    }

    fn on_phase_start(&mut self, phase: Phase, start: NodeId) {
        info!("Phase {} started at {}", phase.as_str_name(), start);
    }

    fn on_move(&mut self, phase: Phase, from: NodeId, to: NodeId, weight: u32) {
        debug!("[{}] {} -> {} (weight {})", phase.as_str_name(), from, to, weight);
    }

    fn on_gold_collected(&mut self, at: NodeId, amount: u32, steps_remaining: u32) {
        info!("Picked up {} gold at {} ({} steps left)", amount, at, steps_remaining);
    }

    fn on_phase_finished(&mut self, phase: Phase, success: bool, steps: u32) {
        if success {
            info!("Phase {} finished after {} steps", phase.as_str_name(), steps);
        } else {
            warn!("Phase {} failed after {} steps", phase.as_str_name(), steps);
        }
    }

    fn on_game_finished(&mut self, outcome: &RunOutcome) {
        info!("Run finished: {}", if outcome.is_success() { "success" } else { "failure" });
        info!("- orb found: {} in {} steps", outcome.orb_found, outcome.hunt_steps);
        info!("- gold collected: {}", outcome.gold_collected);
        info!("- steps remaining: {}", outcome.steps_remaining);
    }
}
