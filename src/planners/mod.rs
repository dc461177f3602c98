mod explorer;
mod scavenger;

pub use explorer::{Explorer, HuntReport};
pub use scavenger::{Detour, ScramReport, Scavenger};
