use std::collections::HashSet;

use tracing::debug;

use crate::infra::{CavernError, NodeId, NodeStatus};
use crate::state::HuntState;

/// Result of a hunt. Not reaching the orb is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntReport {
    pub reached_orb: bool,
    /// Every node stood on, in the order first reached. No duplicates.
    pub visit_order: Vec<NodeId>,
}

/// Nodes stood on during one hunt, with constant-time membership.
#[derive(Default)]
struct VisitLog {
    seen: HashSet<NodeId>,
    order: Vec<NodeId>,
}

impl VisitLog {
    /// Returns false if the node was already visited.
    fn insert(&mut self, id: NodeId) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.order.push(id);
        true
    }

    fn contains(&self, id: NodeId) -> bool {
        self.seen.contains(&id)
    }
}

/// One level of the depth-first walk: the node we stand on when trying its
/// neighbours, and the neighbours not yet tried, closest to the orb first.
struct Frame {
    node: NodeId,
    pending: std::vec::IntoIter<NodeStatus>,
}

impl Frame {
    fn new<S: HuntState>(state: &S) -> Self {
        let mut neighbors = state.neighbors();
        neighbors.sort();
        Self {
            node: state.current_location(),
            pending: neighbors.into_iter(),
        }
    }
}

/// Blind search for the orb: depth-first with backtracking, trying the
/// neighbour that looks closest to the orb first.
pub struct Explorer;

impl Explorer {
    #[tracing::instrument(level = "debug", skip(state))]
    pub fn hunt<S: HuntState>(state: &mut S) -> Result<HuntReport, CavernError> {
        let mut visited = VisitLog::default();

        let start = state.current_location();
        visited.insert(start);
        if state.distance_to_orb() == 0 {
            debug!("Orb found at start {}", start);
            return Ok(Self::report(true, visited));
        }

        let mut stack = vec![Frame::new(state)];

        while let Some(frame) = stack.last_mut() {
            let here = frame.node;
            let next = frame.pending.find(|status| !visited.contains(status.id));

            let Some(next) = next else {
                stack.pop();
                if let Some(parent) = stack.last() {
                    debug!("Dead end at {}, backtracking to {}", here, parent.node);
                    state.move_to(parent.node)?;
                }
                continue;
            };

            state.move_to(next.id)?;
            let arrived = state.current_location();
            if !visited.insert(arrived) {
                state.move_to(here)?;
                continue;
            }

            if state.distance_to_orb() == 0 {
                debug!(
                    "Orb found at {} after visiting {} nodes",
                    arrived,
                    visited.order.len()
                );
                return Ok(Self::report(true, visited));
            }

            stack.push(Frame::new(state));
        }

        debug!("Orb not reachable, explored {} nodes", visited.order.len());
        Ok(Self::report(false, visited))
    }

    fn report(reached_orb: bool, visited: VisitLog) -> HuntReport {
        HuntReport {
            reached_orb,
            visit_order: visited.order,
        }
    }
}
