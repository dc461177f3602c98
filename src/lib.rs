pub mod game;
pub mod infra;
pub mod planners;
pub mod state;

// Re-export commonly used types for convenience
pub use game::{Game, RunOutcome};
pub use infra::{CavernError, NodeId, PathOracle};
pub use planners::{Explorer, Scavenger};
pub use state::{Cavern, Level, LevelGenerator};
