use crate::error::{KnapsackError, Result};
use crate::rng::RandomNumberGenerator;

/// Selects one parent index through roulette wheel selection.
///
/// Each individual is picked with probability proportional to its fitness.
/// Negative fitness values (possible in penalty mode) are handled by shifting
/// the whole vector up so its minimum becomes zero. When the shifted total is
/// not positive every individual is equally likely.
///
/// # Examples
///
/// ```
/// use knapsack_ga::rng::RandomNumberGenerator;
/// use knapsack_ga::selection::roulette_select;
///
/// let fitness = vec![-4.0, 2.0, 6.0];
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let idx = roulette_select(&fitness, &mut rng).unwrap();
/// // the minimum is shifted to zero weight and can never be drawn
/// assert_ne!(idx, 0);
/// ```
///
/// # Errors
///
/// Returns `KnapsackError::EmptyPopulation` if `fitness` is empty.
pub fn roulette_select(fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
    if fitness.is_empty() {
        return Err(KnapsackError::EmptyPopulation);
    }

    let shifted = shifted_weights(fitness);
    let total: f64 = shifted.iter().sum();
    if !(total > 0.0) {
        return Ok(rng.gen_index(fitness.len()));
    }

    let r = rng.gen_unit() * total;
    let mut cumulative = 0.0;
    for (i, &w) in shifted.iter().enumerate() {
        cumulative += w;
        if r < cumulative {
            return Ok(i);
        }
    }

    // Rounding left r at the very top of the wheel: take the last slot with weight.
    Ok(shifted.iter().rposition(|&w| w > 0.0).unwrap_or(fitness.len() - 1))
}

/// Shifts fitness values so the minimum is zero when it is negative.
fn shifted_weights(fitness: &[f64]) -> Vec<f64> {
    let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
    if min < 0.0 {
        fitness.iter().map(|&f| f - min).collect()
    } else {
        fitness.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_only_when_negative() {
        assert_eq!(shifted_weights(&[1.0, 2.0]), vec![1.0, 2.0]);
        assert_eq!(shifted_weights(&[-1.0, 2.0]), vec![0.0, 3.0]);
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let fitness = vec![0.0, 5.0, 0.0];
        let mut rng = RandomNumberGenerator::from_seed(42);
        for _ in 0..200 {
            assert_eq!(roulette_select(&fitness, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_proportional_frequencies() {
        let fitness = vec![1.0, 3.0];
        let mut rng = RandomNumberGenerator::from_seed(3);
        let draws = 10_000;
        let ones = (0..draws)
            .filter(|_| roulette_select(&fitness, &mut rng).unwrap() == 1)
            .count();
        let share = ones as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.03, "share was {}", share);
    }

    #[test]
    fn test_all_zero_falls_back_to_uniform() {
        let fitness = vec![0.0; 4];
        let mut rng = RandomNumberGenerator::from_seed(8);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[roulette_select(&fitness, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_equal_negative_falls_back_to_uniform() {
        let fitness = vec![-3.0, -3.0, -3.0];
        let mut rng = RandomNumberGenerator::from_seed(8);
        let mut replay = rng.clone();
        let idx = roulette_select(&fitness, &mut rng).unwrap();
        assert_eq!(idx, replay.gen_index(3));
    }

    #[test]
    fn test_roulette_empty_population() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(matches!(
            roulette_select(&[], &mut rng),
            Err(KnapsackError::EmptyPopulation)
        ));
    }
}
