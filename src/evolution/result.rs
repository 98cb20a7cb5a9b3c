use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::options::Params;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    MaxGenerations,
    EarlyStop,
    TimeLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxGenerations => f.write_str("max_generations"),
            StopReason::EarlyStop => f.write_str("early_stop"),
            StopReason::TimeLimit => f.write_str("time_limit"),
        }
    }
}

/// The record of one run, written as one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub instance_meta: Map<String, Value>,
    pub capacity: f64,
    pub n_items: usize,

    pub seed: u64,
    pub run_index: usize,
    pub params: Params,

    /// Number of generations observed, counting from 1.
    pub gen_reached: usize,
    pub time_sec: f64,
    /// Zero when the run had no time limit.
    pub time_limit_sec: f64,
    pub stopped_reason: StopReason,

    pub best_fitness: f64,
    pub best_value: f64,
    pub best_weight: f64,
    pub feasible: bool,
    /// Best-ever chromosome, one `0`/`1` per item.
    pub best_bits: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_best_fitness: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_avg_fitness: Option<Vec<f64>>,
}
