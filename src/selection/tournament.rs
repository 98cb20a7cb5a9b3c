use crate::error::{KnapsackError, Result};
use crate::rng::RandomNumberGenerator;

/// Selects one parent index through tournament selection.
///
/// `k` contestants are drawn uniformly with replacement and the one with the
/// highest fitness wins. Among contestants with equal fitness the one drawn
/// first wins, so the result is fully determined by the random draws.
///
/// Smaller tournaments keep more diversity, larger ones push harder towards the
/// current best.
///
/// # Examples
///
/// ```
/// use knapsack_ga::rng::RandomNumberGenerator;
/// use knapsack_ga::selection::tournament_select;
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let winner = tournament_select(&fitness, 3, &mut rng).unwrap();
/// assert!(winner < fitness.len());
/// ```
///
/// # Errors
///
/// Returns `KnapsackError::EmptyPopulation` if `fitness` is empty.
pub fn tournament_select(fitness: &[f64], k: usize, rng: &mut RandomNumberGenerator) -> Result<usize> {
    if fitness.is_empty() {
        return Err(KnapsackError::EmptyPopulation);
    }

    let n = fitness.len();
    let mut best_idx = rng.gen_index(n);
    for _ in 1..k.max(1) {
        let idx = rng.gen_index(n);
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }

    Ok(best_idx)
}
