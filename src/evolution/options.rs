//! # Params
//!
//! The `Params` struct holds every algorithm and experiment setting of a run:
//! population size, operator choices and rates, constraint handling, stopping
//! criteria, seeds, subset sampling and trace toggles. It is deserialized from
//! the JSON configuration file and checked with [`Params::validate`] before a
//! run starts.
//!
//! `RunSettings` carries the per-invocation knobs that are not part of the
//! configuration file: the wall-clock budget, the progress interval and the
//! parallel threshold.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_ga::evolution::options::Params;
//! use knapsack_ga::breeding::MutationRate;
//!
//! let params = Params::builder()
//!     .population(50)
//!     .pc(0.9)
//!     .pm(MutationRate::InverseLength)
//!     .elitism(2)
//!     .max_generations(200)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.population, 50);
//! assert!(Params::builder().population(1).build().is_err());
//! ```
//!
//! ## JSON layout
//!
//! ```json
//! {
//!   "population": 100, "pc": 0.9, "pm": "1/n", "elitism": 2,
//!   "selection": {"type": "tournament", "k": 3},
//!   "crossover": "one_point", "mutation": "bit_flip",
//!   "constraint": {"mode": "repair", "lambda": 10.0},
//!   "max_generations": 500,
//!   "early_stop": {"patience": 50, "min_delta": 0.0},
//!   "runs": 5, "seeds": [1, 2, 3],
//!   "subset": {"mode": "none", "size": 0, "seed": 0},
//!   "trace": {"store_best_per_gen": true, "store_avg_per_gen": true}
//! }
//! ```
//!
//! Only `population`, `pc`, `pm` and `max_generations` are required.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    breeding::{Crossover, Mutation, MutationRate},
    error::{KnapsackError, Result},
    fitness::{ConstraintConfig, DEFAULT_PARALLEL_THRESHOLD},
    selection::{SelectionConfig, SelectionKind},
    subset::SubsetConfig,
};

/// Early stopping settings. A `patience` of zero disables early stopping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EarlyStopConfig {
    #[serde(default)]
    pub patience: usize,
    #[serde(default)]
    pub min_delta: f64,
}

/// Which per-generation statistics are recorded in the run result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "enabled")]
    pub store_best_per_gen: bool,
    #[serde(default = "enabled")]
    pub store_avg_per_gen: bool,
}

fn enabled() -> bool {
    true
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            store_best_per_gen: true,
            store_avg_per_gen: true,
        }
    }
}

fn default_runs() -> usize {
    1
}

fn default_seeds() -> Vec<u64> {
    vec![0]
}

/// All algorithm and experiment parameters of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub population: usize,
    /// Crossover probability.
    pub pc: f64,
    /// Per-gene mutation probability.
    pub pm: MutationRate,
    #[serde(default)]
    pub elitism: usize,

    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub crossover: Crossover,
    #[serde(default)]
    pub mutation: Mutation,
    #[serde(default)]
    pub constraint: ConstraintConfig,

    pub max_generations: usize,
    #[serde(default)]
    pub early_stop: EarlyStopConfig,

    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default = "default_seeds")]
    pub seeds: Vec<u64>,

    #[serde(default)]
    pub subset: SubsetConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Params {
    /// Returns a builder for creating a `Params` instance.
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::default()
    }

    /// Checks every numeric range.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::Configuration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.population < 2 {
            return Err(config_error(format!(
                "population must be at least 2, got {}",
                self.population
            )));
        }
        if !(0.0..=1.0).contains(&self.pc) {
            return Err(config_error(format!("pc must be in [0, 1], got {}", self.pc)));
        }
        if let MutationRate::Fixed(pm) = self.pm {
            if !(0.0..=1.0).contains(&pm) {
                return Err(config_error(format!("pm must be in [0, 1], got {}", pm)));
            }
        }
        if self.elitism > self.population {
            return Err(config_error(format!(
                "elitism ({}) cannot exceed population ({})",
                self.elitism, self.population
            )));
        }
        if self.selection.kind == SelectionKind::Tournament && self.selection.k < 2 {
            return Err(config_error(format!(
                "selection.k must be at least 2, got {}",
                self.selection.k
            )));
        }
        if !(self.constraint.lambda >= 0.0) {
            return Err(config_error(format!(
                "constraint.lambda must be non-negative, got {}",
                self.constraint.lambda
            )));
        }
        if self.max_generations < 1 {
            return Err(config_error("max_generations must be at least 1".to_string()));
        }
        if self.runs < 1 {
            return Err(config_error("runs must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn config_error(message: String) -> KnapsackError {
    KnapsackError::Configuration(message)
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population: 100,
            pc: 0.9,
            pm: MutationRate::default(),
            elitism: 0,
            selection: SelectionConfig::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            constraint: ConstraintConfig::default(),
            max_generations: 100,
            early_stop: EarlyStopConfig::default(),
            runs: default_runs(),
            seeds: default_seeds(),
            subset: SubsetConfig::default(),
            trace: TraceConfig::default(),
        }
    }
}

/// Builder for `Params`.
///
/// Unset fields fall back to `Params::default()`.
#[derive(Debug, Clone, Default)]
pub struct ParamsBuilder {
    population: Option<usize>,
    pc: Option<f64>,
    pm: Option<MutationRate>,
    elitism: Option<usize>,
    selection: Option<SelectionConfig>,
    crossover: Option<Crossover>,
    mutation: Option<Mutation>,
    constraint: Option<ConstraintConfig>,
    max_generations: Option<usize>,
    early_stop: Option<EarlyStopConfig>,
    runs: Option<usize>,
    seeds: Option<Vec<u64>>,
    subset: Option<SubsetConfig>,
    trace: Option<TraceConfig>,
}

impl ParamsBuilder {
    pub fn population(mut self, value: usize) -> Self {
        self.population = Some(value);
        self
    }

    pub fn pc(mut self, value: f64) -> Self {
        self.pc = Some(value);
        self
    }

    pub fn pm(mut self, value: MutationRate) -> Self {
        self.pm = Some(value);
        self
    }

    pub fn elitism(mut self, value: usize) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn selection(mut self, value: SelectionConfig) -> Self {
        self.selection = Some(value);
        self
    }

    pub fn crossover(mut self, value: Crossover) -> Self {
        self.crossover = Some(value);
        self
    }

    pub fn mutation(mut self, value: Mutation) -> Self {
        self.mutation = Some(value);
        self
    }

    pub fn constraint(mut self, value: ConstraintConfig) -> Self {
        self.constraint = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    /// Enables early stopping after `patience` generations without an
    /// improvement larger than `min_delta`.
    pub fn early_stop(mut self, patience: usize, min_delta: f64) -> Self {
        self.early_stop = Some(EarlyStopConfig { patience, min_delta });
        self
    }

    pub fn runs(mut self, value: usize) -> Self {
        self.runs = Some(value);
        self
    }

    pub fn seeds(mut self, value: Vec<u64>) -> Self {
        self.seeds = Some(value);
        self
    }

    pub fn subset(mut self, value: SubsetConfig) -> Self {
        self.subset = Some(value);
        self
    }

    pub fn trace(mut self, store_best_per_gen: bool, store_avg_per_gen: bool) -> Self {
        self.trace = Some(TraceConfig {
            store_best_per_gen,
            store_avg_per_gen,
        });
        self
    }

    /// Builds and validates the `Params` instance.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::Configuration` if any value is out of range.
    pub fn build(self) -> Result<Params> {
        let defaults = Params::default();
        let params = Params {
            population: self.population.unwrap_or(defaults.population),
            pc: self.pc.unwrap_or(defaults.pc),
            pm: self.pm.unwrap_or(defaults.pm),
            elitism: self.elitism.unwrap_or(defaults.elitism),
            selection: self.selection.unwrap_or(defaults.selection),
            crossover: self.crossover.unwrap_or(defaults.crossover),
            mutation: self.mutation.unwrap_or(defaults.mutation),
            constraint: self.constraint.unwrap_or(defaults.constraint),
            max_generations: self.max_generations.unwrap_or(defaults.max_generations),
            early_stop: self.early_stop.unwrap_or(defaults.early_stop),
            runs: self.runs.unwrap_or(defaults.runs),
            seeds: self.seeds.unwrap_or(defaults.seeds),
            subset: self.subset.unwrap_or(defaults.subset),
            trace: self.trace.unwrap_or(defaults.trace),
        };
        params.validate()?;
        Ok(params)
    }
}

/// Per-invocation settings of a run that do not belong to the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Wall-clock budget per run. `None` or a zero duration means unlimited.
    pub time_limit: Option<Duration>,
    /// Progress is reported on the first generation and every `log_every`-th
    /// one. Zero silences progress events.
    pub log_every: usize,
    /// Population size from which evaluation runs in parallel.
    pub parallel_threshold: usize,
}

impl RunSettings {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_log_every(mut self, every: usize) -> Self {
        self.log_every = every;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The time limit in seconds as reported in results; zero when unlimited.
    pub fn time_limit_secs(&self) -> f64 {
        self.time_limit.map(|d| d.as_secs_f64()).unwrap_or(0.0)
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            time_limit: None,
            log_every: 50,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
