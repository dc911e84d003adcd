pub mod arcade;
pub mod simulate;

pub use arcade::{ArcadeMode, ArcadeOptions};
pub use simulate::{SimulateOptions, SimulationSummary, run_simulation};
