//! Penalty constraint handling.

/// Penalized fitness of a single individual.
///
/// Equals `value` exactly when `weight <= capacity`.
pub fn penalized_fitness(value: f64, weight: f64, capacity: f64, lambda: f64) -> f64 {
    let overweight = (weight - capacity).max(0.0);
    value - lambda * overweight
}

/// Penalized fitness for index-aligned weight and value sums.
pub fn penalty_fitness(weights: &[f64], values: &[f64], capacity: f64, lambda: f64) -> Vec<f64> {
    weights
        .iter()
        .zip(values)
        .map(|(&w, &v)| penalized_fitness(v, w, capacity, lambda))
        .collect()
}
