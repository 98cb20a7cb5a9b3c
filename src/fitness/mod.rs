//! # Fitness Evaluation
//!
//! This module turns a population into scores. It computes weight and value
//! sums for single chromosomes and for whole populations, and applies one of two
//! constraint handling modes:
//!
//! - **Penalty**: `fitness = value - lambda * max(0, weight - capacity)`. The
//!   population is left untouched, so infeasible genetic material survives.
//! - **Repair**: overweight chromosomes drop their lowest value density items
//!   until they fit; the repaired genes replace the input and
//!   `fitness = value`.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_ga::chromosome::Chromosome;
//! use knapsack_ga::fitness::{ConstraintConfig, Evaluator};
//! use knapsack_ga::instance::{Instance, Item};
//!
//! let instance = Instance::new(
//!     10.0,
//!     vec![Item::new(1, 5.0, 10.0), Item::new(2, 4.0, 8.0), Item::new(3, 3.0, 6.0)],
//! );
//! let evaluator = Evaluator::new(&instance, ConstraintConfig::penalty(100.0));
//!
//! let all_in = Chromosome::from_bit_string("111").unwrap();
//! let evaluated = evaluator.evaluate(vec![all_in]);
//! assert_eq!(evaluated.fitness[0], 24.0 - 100.0 * 2.0);
//! ```

pub mod penalty;
pub mod repair;

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chromosome::{Chromosome, Population};
use crate::error::KnapsackError;
use crate::instance::{build_item_arrays, Instance, ItemArrays};

pub use penalty::{penalized_fitness, penalty_fitness};
pub use repair::{repair_population, repair_solution};

/// Population size from which batched sums and repair run on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Smallest weight used as a ratio denominator.
pub const WEIGHT_FLOOR: f64 = 1e-12;

/// How the capacity constraint is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintMode {
    #[default]
    Repair,
    Penalty,
}

impl fmt::Display for ConstraintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintMode::Repair => f.write_str("repair"),
            ConstraintMode::Penalty => f.write_str("penalty"),
        }
    }
}

impl FromStr for ConstraintMode {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "repair" => Ok(ConstraintMode::Repair),
            "penalty" => Ok(ConstraintMode::Penalty),
            other => Err(KnapsackError::Configuration(format!(
                "constraint.mode: unknown constraint mode `{}`, use `repair` or `penalty`",
                other
            ))),
        }
    }
}

fn default_lambda() -> f64 {
    10.0
}

/// Constraint handling settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    #[serde(default)]
    pub mode: ConstraintMode,
    /// Penalty coefficient; only read in penalty mode.
    #[serde(rename = "lambda", default = "default_lambda")]
    pub lambda: f64,
}

impl ConstraintConfig {
    pub fn repair() -> Self {
        Self {
            mode: ConstraintMode::Repair,
            lambda: default_lambda(),
        }
    }

    pub fn penalty(lambda: f64) -> Self {
        Self {
            mode: ConstraintMode::Penalty,
            lambda,
        }
    }
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self::repair()
    }
}

/// Sum of the weights of the included items.
pub fn total_weight(chromosome: &Chromosome, weights: &[f64]) -> f64 {
    dot(chromosome, weights)
}

/// Sum of the values of the included items.
pub fn total_value(chromosome: &Chromosome, values: &[f64]) -> f64 {
    dot(chromosome, values)
}

/// Whether the included items fit into the knapsack.
pub fn is_feasible(chromosome: &Chromosome, weights: &[f64], capacity: f64) -> bool {
    total_weight(chromosome, weights) <= capacity
}

/// Weight sum of every chromosome in the population.
pub fn population_weights(population: &[Chromosome], weights: &[f64]) -> Vec<f64> {
    batched_dot(population, weights, DEFAULT_PARALLEL_THRESHOLD)
}

/// Value sum of every chromosome in the population.
pub fn population_values(population: &[Chromosome], values: &[f64]) -> Vec<f64> {
    batched_dot(population, values, DEFAULT_PARALLEL_THRESHOLD)
}

// Summation always runs in item order, so the parallel path yields the same bits.
fn dot(chromosome: &Chromosome, vector: &[f64]) -> f64 {
    chromosome
        .genes()
        .iter()
        .zip(vector)
        .filter(|&(&gene, _)| gene)
        .map(|(_, &x)| x)
        .sum()
}

pub(crate) fn batched_dot(population: &[Chromosome], vector: &[f64], threshold: usize) -> Vec<f64> {
    if population.len() >= threshold {
        population.par_iter().map(|c| dot(c, vector)).collect()
    } else {
        population.iter().map(|c| dot(c, vector)).collect()
    }
}

/// A population together with its per-individual sums and fitness.
///
/// All vectors are index-aligned with `population`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedPopulation {
    pub population: Population,
    pub fitness: Vec<f64>,
    pub weights: Vec<f64>,
    pub values: Vec<f64>,
}

impl EvaluatedPopulation {
    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Index of the highest fitness; the lowest index wins ties.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &f) in self.fitness.iter().enumerate() {
            match best {
                Some(b) if f <= self.fitness[b] => {}
                _ => best = Some(i),
            }
        }
        best
    }

    pub fn max_fitness(&self) -> f64 {
        self.fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.fitness.is_empty() {
            return 0.0;
        }
        self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
    }
}

/// Scores populations of one instance under one constraint configuration.
#[derive(Debug, Clone)]
pub struct Evaluator {
    arrays: ItemArrays,
    capacity: f64,
    constraint: ConstraintConfig,
    parallel_threshold: usize,
}

impl Evaluator {
    pub fn new(instance: &Instance, constraint: ConstraintConfig) -> Self {
        Self {
            arrays: build_item_arrays(instance),
            capacity: instance.capacity,
            constraint,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the population size from which evaluation runs in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn n_items(&self) -> usize {
        self.arrays.len()
    }

    /// Evaluates a population, consuming it.
    ///
    /// In repair mode the returned population holds the repaired chromosomes;
    /// in penalty mode it is the input unchanged.
    pub fn evaluate(&self, population: Population) -> EvaluatedPopulation {
        match self.constraint.mode {
            ConstraintMode::Penalty => {
                let weights = batched_dot(&population, &self.arrays.weights, self.parallel_threshold);
                let values = batched_dot(&population, &self.arrays.values, self.parallel_threshold);
                let fitness = penalty_fitness(&weights, &values, self.capacity, self.constraint.lambda);
                EvaluatedPopulation {
                    population,
                    fitness,
                    weights,
                    values,
                }
            }
            ConstraintMode::Repair => {
                let (population, weights, values) = repair::repair_population_with_threshold(
                    population,
                    &self.arrays,
                    self.capacity,
                    self.parallel_threshold,
                );
                let fitness = values.clone();
                EvaluatedPopulation {
                    population,
                    fitness,
                    weights,
                    values,
                }
            }
        }
    }
}
