pub mod breeding;
pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod instance;
pub mod io;
pub mod rng;
pub mod selection;
pub mod subset;

// Re-export commonly used types for convenience
pub use chromosome::{Chromosome, Population};
pub use error::{KnapsackError, OptionExt, Result, ResultExt};
pub use evolution::{EvolutionLauncher, Experiment, Params, RunResult, RunSettings, StopReason};
pub use fitness::{ConstraintConfig, ConstraintMode, EvaluatedPopulation, Evaluator};
pub use instance::{Instance, Item};
