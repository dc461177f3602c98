use tracing::{debug, warn};

use crate::infra::{CavernError, NodeId, PathOracle};
use crate::state::{Cavern, ScramState};

/// A gold node worth visiting before heading for the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detour {
    pub target: NodeId,
    pub gold: u32,
    pub cost_to_target: u64,
    pub cost_to_exit: u64,
    /// Shortest path from the current node to `target`, both ends included.
    pub path: Vec<NodeId>,
}

impl Detour {
    /// Whole gold per step to reach the target, rounded down.
    pub fn ratio(&self) -> u64 {
        u64::from(self.gold) / self.cost_to_target.max(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScramReport {
    pub gold_collected: u32,
    /// Gold nodes walked to, in order.
    pub detours: Vec<NodeId>,
    pub steps_remaining: u32,
}

/// Greedy gold collection that never risks missing the exit.
///
/// Before every detour the whole round trip (here to gold, gold to exit) is
/// checked against the live budget, so the direct escape stays affordable.
pub struct Scavenger;

impl Scavenger {
    #[tracing::instrument(level = "debug", skip(state))]
    pub fn scram<S: ScramState>(state: &mut S) -> Result<ScramReport, CavernError> {
        let mut report = ScramReport::default();
        let exit = state.exit();

        let direct = route(state.cavern(), state.current_node(), exit)?;
        let direct_cost = cost_of(state.cavern(), &direct)?;
        if direct_cost > u64::from(state.steps_remaining()) {
            warn!(
                "Exit is {} steps away but only {} remain",
                direct_cost,
                state.steps_remaining()
            );
        }

        loop {
            if state.cavern().gold(state.current_node()) > 0 {
                let amount = state.pick_up_gold()?;
                report.gold_collected = report.gold_collected.saturating_add(amount);
            }

            let Some(detour) = Self::select_detour(state)? else {
                break;
            };
            debug!(
                "Detour to {} for {} gold: {} steps there, {} to exit, {} left",
                detour.target,
                detour.gold,
                detour.cost_to_target,
                detour.cost_to_exit,
                state.steps_remaining()
            );
            walk(state, &detour.path)?;
            report.detours.push(detour.target);
        }

        let path = route(state.cavern(), state.current_node(), exit)?;
        debug!(
            "Heading for exit {} from {} ({} steps left)",
            exit,
            state.current_node(),
            state.steps_remaining()
        );
        walk(state, &path)?;

        report.steps_remaining = state.steps_remaining();
        Ok(report)
    }

    /// Pick the affordable gold node with the most gold per step to reach it.
    ///
    /// A node is affordable when reaching it and then the exit fits in the
    /// remaining budget. The ratio is integer gold / steps, so 3 gold over 2
    /// steps ties with 1 gold over 1 step. Nodes are considered in ascending
    /// id order and the first one wins a tie. `None` means head straight for
    /// the exit.
    pub fn select_detour<S: ScramState>(state: &S) -> Result<Option<Detour>, CavernError> {
        let cavern = state.cavern();
        let here = state.current_node();
        let exit = state.exit();
        let budget = u64::from(state.steps_remaining());

        let mut best: Option<Detour> = None;
        for node in cavern.nodes() {
            if node.gold() == 0 || node.id == here {
                continue;
            }

            let path = route(cavern, here, node.id)?;
            let cost_to_target = cost_of(cavern, &path)?;
            let cost_to_exit = cost_of(cavern, &route(cavern, node.id, exit)?)?;

            if cost_to_target + cost_to_exit > budget {
                debug!(
                    "Skipping {}: round trip {} + {} exceeds {}",
                    node.id, cost_to_target, cost_to_exit, budget
                );
                continue;
            }

            let candidate = Detour {
                target: node.id,
                gold: node.gold(),
                cost_to_target,
                cost_to_exit,
                path,
            };
            if best.as_ref().is_none_or(|b| candidate.ratio() > b.ratio()) {
                best = Some(candidate);
            }
        }

        Ok(best)
    }
}

fn route(cavern: &Cavern, from: NodeId, to: NodeId) -> Result<Vec<NodeId>, CavernError> {
    cavern
        .shortest_path(from, to)
        .ok_or(CavernError::NoPath { from, to })
}

fn cost_of(cavern: &Cavern, path: &[NodeId]) -> Result<u64, CavernError> {
    let (Some(&from), Some(&to)) = (path.first(), path.last()) else {
        return Ok(0);
    };
    cavern
        .path_cost(path)
        .ok_or(CavernError::NoPath { from, to })
}

/// Follow `path` one edge at a time; the first node is where we stand.
fn walk<S: ScramState>(state: &mut S, path: &[NodeId]) -> Result<(), CavernError> {
    for &next in path.iter().skip(1) {
        state.move_to(next)?;
    }
    Ok(())
}
