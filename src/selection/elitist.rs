use std::cmp::Ordering;

/// Returns the indices of the `elitism` fittest individuals, best first.
///
/// Individuals with equal fitness keep their population order, so the lowest
/// index wins a tie. If `elitism` exceeds the population size every index is
/// returned. No randomness is involved.
///
/// # Examples
///
/// ```
/// use knapsack_ga::selection::elite_indices;
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.8];
/// assert_eq!(elite_indices(&fitness, 2), vec![1, 3]);
/// assert!(elite_indices(&fitness, 0).is_empty());
/// ```
pub fn elite_indices(fitness: &[f64], elitism: usize) -> Vec<usize> {
    if elitism == 0 {
        return Vec::new();
    }

    // NaN ranks below every real score
    let key = |i: usize| {
        if fitness[i].is_nan() {
            f64::NEG_INFINITY
        } else {
            fitness[i]
        }
    };

    let mut order: Vec<usize> = (0..fitness.len()).collect();
    // stable sort: equal keys stay in ascending index order
    order.sort_by(|&a, &b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    order.truncate(elitism);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elite_order() {
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        assert_eq!(elite_indices(&fitness, 3), vec![3, 1, 0]);
    }

    #[test]
    fn test_elite_ties_lowest_index_first() {
        let fitness = vec![2.0, 7.0, 7.0, 1.0, 7.0];
        assert_eq!(elite_indices(&fitness, 2), vec![1, 2]);
        assert_eq!(elite_indices(&fitness, 4), vec![1, 2, 4, 0]);
    }

    #[test]
    fn test_elite_more_than_population() {
        let fitness = vec![1.0, 2.0];
        assert_eq!(elite_indices(&fitness, 10), vec![1, 0]);
    }

    #[test]
    fn test_nan_sorts_last() {
        let fitness = vec![f64::NAN, 1.0, 2.0];
        assert_eq!(elite_indices(&fitness, 2), vec![2, 1]);
    }

    #[test]
    fn test_no_elitism() {
        assert!(elite_indices(&[1.0, 2.0, 3.0], 0).is_empty());
    }
}
