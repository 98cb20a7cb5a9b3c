//! # Breeding
//!
//! Builds the next population from an evaluated one: elites are carried over
//! verbatim, the remaining slots are filled with children produced by
//! selection, crossover and mutation.
pub mod crossover;
pub mod mutation;

pub use crossover::{one_point_crossover, uniform_crossover, Crossover};
pub use mutation::{bit_flip_mutation, Mutation, MutationRate};

use tracing::debug;

use crate::{
    chromosome::Population,
    error::{KnapsackError, Result},
    evolution::options::Params,
    fitness::EvaluatedPopulation,
    rng::RandomNumberGenerator,
    selection::{elite_indices, select_parent},
};

/// Produces the next generation of `params.population` individuals.
///
/// The first `min(elitism, P)` slots hold the elites, best first. Every other
/// slot is filled pairwise: two parents are selected independently with
/// replacement, crossed with probability `pc`, and both children are mutated.
/// When only one slot is left, the second child is still produced and then
/// dropped so the number of random draws per pair never changes.
///
/// No fitness is computed here; the caller evaluates the returned population.
///
/// # Errors
///
/// Returns `KnapsackError::EmptyPopulation` if `current` holds no individuals.
pub fn next_generation(
    current: &EvaluatedPopulation,
    params: &Params,
    rng: &mut RandomNumberGenerator,
) -> Result<Population> {
    if current.is_empty() {
        return Err(KnapsackError::EmptyPopulation);
    }

    let size = params.population;
    let n = current.population[0].len();
    let pm = params.pm.resolve(n);

    let mut next: Population = Vec::with_capacity(size);
    for idx in elite_indices(&current.fitness, params.elitism.min(size)) {
        next.push(current.population[idx].clone());
    }
    let elites = next.len();

    while next.len() < size {
        let p1 = select_parent(&current.fitness, &params.selection, rng)?;
        let p2 = select_parent(&current.fitness, &params.selection, rng)?;

        let (mut child1, mut child2) = params.crossover.apply(
            &current.population[p1],
            &current.population[p2],
            params.pc,
            rng,
        );
        params.mutation.apply(&mut child1, pm, rng);
        params.mutation.apply(&mut child2, pm, rng);

        next.push(child1);
        if next.len() < size {
            next.push(child2);
        }
    }

    debug!(elites, offspring = size - elites, pm, "bred next generation");
    Ok(next)
}
