mod cavern;
mod generator;
mod hunt_state;
mod scram_state;

pub use cavern::{Cavern, Node};
pub use generator::{GeneratorConfig, Level, LevelGenerator};
pub use hunt_state::{HuntSession, HuntState};
pub use scram_state::{ScramSession, ScramState};
