use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{
    options::{Params, RunSettings},
    result::{RunResult, StopReason},
};
use crate::{
    breeding::next_generation,
    chromosome::{init_population, Chromosome},
    error::{KnapsackError, OptionExt, Result},
    fitness::{EvaluatedPopulation, Evaluator},
    instance::Instance,
    rng::RandomNumberGenerator,
};

/// Slack allowed when checking the best weight against the capacity.
const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// The best individual seen so far in a run.
#[derive(Debug, Clone)]
struct BestSoFar {
    chromosome: Chromosome,
    fitness: f64,
    value: f64,
    weight: f64,
}

impl BestSoFar {
    fn from_index(current: &EvaluatedPopulation, idx: usize) -> Self {
        Self {
            chromosome: current.population[idx].clone(),
            fitness: current.fitness[idx],
            value: current.values[idx],
            weight: current.weights[idx],
        }
    }
}

/// Runs the genetic algorithm on one instance.
///
/// A launcher is built once per instance and can then be run for any number of
/// seeds. Runs share nothing but read-only data, so one launcher can serve
/// several threads at once.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher {
    evaluator: Evaluator,
    params: Params,
    settings: RunSettings,
    instance_meta: Map<String, Value>,
}

impl EvolutionLauncher {
    /// Creates a launcher for `instance`.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::Configuration` if `params` fail validation and
    /// `KnapsackError::InvalidInstance` if the instance does.
    pub fn new(instance: &Instance, params: Params, settings: RunSettings) -> Result<Self> {
        params.validate()?;
        instance.validate()?;

        let evaluator = Evaluator::new(instance, params.constraint)
            .with_parallel_threshold(settings.parallel_threshold);

        Ok(Self {
            evaluator,
            params,
            settings,
            instance_meta: instance.meta.clone().unwrap_or_default(),
        })
    }

    /// Evolves a population from `seed` until a stop criterion is met.
    ///
    /// Every generation is observed in order: progress is reported, trace
    /// statistics are recorded, the best-ever individual is replaced only on a
    /// strictly better fitness, and then early stopping and the time limit are
    /// checked. The next generation is bred only if another one is permitted.
    ///
    /// The same seed always yields the same result apart from `time_sec`.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::EmptyPopulation` if the population could not be
    /// built. Neither stop criterion is an error.
    pub fn run(&self, seed: u64, run_index: usize) -> Result<RunResult> {
        let start = Instant::now();
        let params = &self.params;
        let capacity = self.evaluator.capacity();
        let n_items = self.evaluator.n_items();
        let log_every = self.settings.log_every;
        let time_limit = self.settings.time_limit.filter(|limit| !limit.is_zero());

        let mut rng = RandomNumberGenerator::from_seed(seed);
        let mut current = self
            .evaluator
            .evaluate(init_population(params.population, n_items, &mut rng));

        let first = best_index(&current)?;
        let mut best = BestSoFar::from_index(&current, first);

        let patience = params.early_stop.patience;
        let min_delta = params.early_stop.min_delta;
        let mut reference = best.fitness;
        let mut stale_generations = 0;

        let mut trace_best = Vec::new();
        let mut trace_avg = Vec::new();

        let mut gen_reached = 0;
        let mut stopped_reason = StopReason::MaxGenerations;

        for generation in 0..params.max_generations {
            gen_reached = generation + 1;

            if log_every > 0 && (generation == 0 || gen_reached % log_every == 0) {
                info!(
                    seed,
                    generation = gen_reached,
                    max_generations = params.max_generations,
                    best_fitness = best.fitness,
                    best_weight = best.weight,
                    capacity,
                    fill_pct = best.weight / capacity * 100.0,
                    elapsed_secs = start.elapsed().as_secs_f64(),
                    "generation progress"
                );
            }

            if params.trace.store_best_per_gen {
                trace_best.push(current.max_fitness());
            }
            if params.trace.store_avg_per_gen {
                trace_avg.push(current.mean_fitness());
            }

            let idx = best_index(&current)?;
            let generation_best = current.fitness[idx];
            if generation_best > best.fitness {
                best = BestSoFar::from_index(&current, idx);
                debug!(
                    seed,
                    generation = gen_reached,
                    best_fitness = best.fitness,
                    best_value = best.value,
                    best_weight = best.weight,
                    "new best individual"
                );
            }

            if patience > 0 {
                if generation_best > reference + min_delta {
                    reference = generation_best;
                    stale_generations = 0;
                } else {
                    stale_generations += 1;
                    if stale_generations >= patience {
                        stopped_reason = StopReason::EarlyStop;
                        break;
                    }
                }
            }

            if let Some(limit) = time_limit {
                if start.elapsed() >= limit {
                    stopped_reason = StopReason::TimeLimit;
                    break;
                }
            }

            if gen_reached == params.max_generations {
                break;
            }

            let next = next_generation(&current, params, &mut rng)?;
            current = self.evaluator.evaluate(next);
        }

        let elapsed = start.elapsed().as_secs_f64();
        let feasible = best.weight <= capacity + FEASIBILITY_TOLERANCE;

        info!(
            seed,
            run_index,
            reason = %stopped_reason,
            gen_reached,
            best_fitness = best.fitness,
            best_value = best.value,
            best_weight = best.weight,
            feasible,
            elapsed_secs = elapsed,
            "run finished"
        );

        Ok(RunResult {
            instance_meta: self.instance_meta.clone(),
            capacity,
            n_items,
            seed,
            run_index,
            params: params.clone(),
            gen_reached,
            time_sec: elapsed,
            time_limit_sec: self.settings.time_limit_secs(),
            stopped_reason,
            best_fitness: best.fitness,
            best_value: best.value,
            best_weight: best.weight,
            feasible,
            best_bits: best.chromosome.to_bit_string(),
            trace_best_fitness: params.trace.store_best_per_gen.then_some(trace_best),
            trace_avg_fitness: params.trace.store_avg_per_gen.then_some(trace_avg),
        })
    }
}

fn best_index(current: &EvaluatedPopulation) -> Result<usize> {
    current
        .best_index()
        .ok_or_else_knapsack(|| KnapsackError::EmptyPopulation)
}

/// Runs the algorithm once on `instance` with `seed`.
///
/// Shorthand for building an [`EvolutionLauncher`] and running it a single time.
pub fn run_single(
    instance: &Instance,
    params: &Params,
    seed: u64,
    settings: &RunSettings,
    run_index: usize,
) -> Result<RunResult> {
    EvolutionLauncher::new(instance, params.clone(), settings.clone())?.run(seed, run_index)
}
