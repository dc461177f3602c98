use std::error::Error;
use std::fmt;

use crate::infra::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CavernError {
    DuplicateNode { id: NodeId },
    UnknownNode { id: NodeId },
    InvalidEdge { from: NodeId, to: NodeId, weight: u32 },
    NotAdjacent { from: NodeId, to: NodeId },
    NoGold { at: NodeId },
    Collapsed { at: NodeId, needed: u32, remaining: u32 },
    NoPath { from: NodeId, to: NodeId },
}

impl fmt::Display for CavernError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CavernError::DuplicateNode { id } => {
                write!(formatter, "Node {} already exists", id)
            }
            CavernError::UnknownNode { id } => write!(formatter, "Unknown node {}", id),
            CavernError::InvalidEdge { from, to, weight } => {
                write!(formatter, "Invalid edge {} -> {} (weight {})", from, to, weight)
            }
            CavernError::NotAdjacent { from, to } => {
                write!(formatter, "Cannot move from {} to {}: not a neighbor", from, to)
            }
            CavernError::NoGold { at } => write!(formatter, "No gold to pick up at {}", at),
            CavernError::Collapsed {
                at,
                needed,
                remaining,
            } => write!(
                formatter,
                "Cavern collapsed at {}: step needs {} but only {} remain",
                at, needed, remaining
            ),
            CavernError::NoPath { from, to } => {
                write!(formatter, "No path from {} to {}", from, to)
            }
        }
    }
}

impl Error for CavernError {}
