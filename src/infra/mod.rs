mod composite_observer;
mod default_observer;
mod error;
mod game_observer;
mod pathfinding;
mod replay;
mod types;

pub use composite_observer::CompositeObserver;
pub use default_observer::DefaultObserver;
pub use error::CavernError;
pub use game_observer::{CavernObserver, NullObserver};
pub use pathfinding::{Dijkstra, PathOracle};
pub use replay::{ReplayFile, ReplayObserver};
pub use types::{NodeId, NodeStatus, Phase, Position};
