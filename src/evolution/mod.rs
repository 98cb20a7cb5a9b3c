//! # Evolution
//!
//! Run configuration, the single-run generation loop, the result record and
//! the multi-run experiment driver.
pub mod experiment;
pub mod launcher;
pub mod options;
pub mod result;

pub use experiment::Experiment;
pub use launcher::{run_single, EvolutionLauncher};
pub use options::{EarlyStopConfig, Params, ParamsBuilder, RunSettings, TraceConfig};
pub use result::{RunResult, StopReason};
