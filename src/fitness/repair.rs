//! Repair constraint handling.
//!
//! An overweight chromosome drops included items in increasing value/weight
//! ratio, ties broken by increasing item index, until its weight fits the
//! capacity. Feasible chromosomes pass through untouched.

use std::cmp::Ordering;

use rayon::prelude::*;

use super::{batched_dot, total_weight, DEFAULT_PARALLEL_THRESHOLD, WEIGHT_FLOOR};
use crate::chromosome::{Chromosome, Population};
use crate::instance::ItemArrays;

/// Returns a repaired copy of `chromosome`.
pub fn repair_solution(chromosome: &Chromosome, arrays: &ItemArrays, capacity: f64) -> Chromosome {
    let mut repaired = chromosome.clone();
    repair_in_place(&mut repaired, arrays, capacity);
    repaired
}

/// Repairs `chromosome` in place and reports whether any gene changed.
pub fn repair_in_place(chromosome: &mut Chromosome, arrays: &ItemArrays, capacity: f64) -> bool {
    let mut current = total_weight(chromosome, &arrays.weights);
    if current <= capacity {
        return false;
    }

    let mut removal: Vec<(f64, usize)> = chromosome
        .included()
        .map(|i| (arrays.values[i] / arrays.weights[i].max(WEIGHT_FLOOR), i))
        .collect();
    if removal.is_empty() {
        return false;
    }
    removal.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));

    let mut changed = false;
    let mut removal = removal.into_iter();
    loop {
        // the running sum drifts; only an exact recount may end the repair
        if current <= capacity {
            current = total_weight(chromosome, &arrays.weights);
            if current <= capacity {
                break;
            }
        }
        match removal.next() {
            Some((_, index)) => {
                chromosome.set(index, false);
                current -= arrays.weights[index];
                changed = true;
            }
            None => break,
        }
    }
    changed
}

/// Repairs every overweight chromosome of a population.
///
/// Returns the repaired population with its weight and value sums.
pub fn repair_population(
    population: Population,
    arrays: &ItemArrays,
    capacity: f64,
) -> (Population, Vec<f64>, Vec<f64>) {
    repair_population_with_threshold(population, arrays, capacity, DEFAULT_PARALLEL_THRESHOLD)
}

pub(crate) fn repair_population_with_threshold(
    mut population: Population,
    arrays: &ItemArrays,
    capacity: f64,
    threshold: usize,
) -> (Population, Vec<f64>, Vec<f64>) {
    if population.len() >= threshold {
        population.par_iter_mut().for_each(|c| {
            repair_in_place(c, arrays, capacity);
        });
    } else {
        for c in population.iter_mut() {
            repair_in_place(c, arrays, capacity);
        }
    }

    let weights = batched_dot(&population, &arrays.weights, threshold);
    let values = batched_dot(&population, &arrays.values, threshold);
    (population, weights, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;

    fn bits(s: &str) -> Chromosome {
        Chromosome::from_bit_string(s).unwrap()
    }

    fn arrays(weights: &[f64], values: &[f64]) -> ItemArrays {
        ItemArrays {
            weights: weights.to_vec(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_feasible_is_unchanged() {
        let a = arrays(&[5.0, 4.0, 3.0], &[10.0, 8.0, 6.0]);
        let c = bits("110");
        assert_eq!(repair_solution(&c, &a, 10.0), c);

        let mut same = c.clone();
        assert!(!repair_in_place(&mut same, &a, 10.0));
    }

    #[test]
    fn test_removes_lowest_ratio_first() {
        // ratios: 1.0, 3.0, 0.5, 2.0
        let a = arrays(&[4.0, 2.0, 6.0, 3.0], &[4.0, 6.0, 3.0, 6.0]);
        let repaired = repair_solution(&bits("1111"), &a, 9.0);
        // drop item 2 (w=6) -> 9 <= 9
        assert_eq!(repaired, bits("1101"));
    }

    #[test]
    fn test_equal_ratios_removed_by_ascending_index() {
        // items 1 and 3 share ratio 1.0, item 0 and 2 are denser
        let a = arrays(&[2.0, 3.0, 1.0, 3.0], &[10.0, 3.0, 5.0, 3.0]);
        let repaired = repair_solution(&bits("1111"), &a, 6.0);
        assert_eq!(repaired, bits("1011"));

        let repaired = repair_solution(&bits("1111"), &a, 3.0);
        assert_eq!(repaired, bits("1010"));
    }

    #[test]
    fn test_empty_chromosome_is_noop() {
        let a = arrays(&[5.0], &[1.0]);
        let c = bits("0");
        assert_eq!(repair_solution(&c, &a, 1.0), c);
    }

    #[test]
    fn test_single_item_larger_than_capacity_is_emptied() {
        let a = arrays(&[50.0, 1.0], &[100.0, 1.0]);
        let repaired = repair_solution(&bits("10"), &a, 10.0);
        assert_eq!(repaired, bits("00"));
    }

    #[test]
    fn test_zero_weight_uses_floor() {
        let a = arrays(&[0.0, 5.0], &[1.0, 1.0]);
        let repaired = repair_solution(&bits("11"), &a, 1.0);
        // item 0 has an enormous ratio, so item 1 goes
        assert_eq!(repaired, bits("10"));
    }

    #[test]
    fn test_repair_population_is_feasible_and_idempotent() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let n = 40;
        let weights: Vec<f64> = (0..n).map(|_| 1.0 + rng.gen_unit() * 9.0).collect();
        let values: Vec<f64> = (0..n).map(|_| rng.gen_unit() * 20.0).collect();
        let a = arrays(&weights, &values);
        let capacity = 60.0;

        let population: Population = (0..50).map(|_| Chromosome::random(n, &mut rng)).collect();
        let (repaired, w_sum, v_sum) = repair_population(population, &a, capacity);

        assert_eq!(repaired.len(), 50);
        for (c, &w) in repaired.iter().zip(&w_sum) {
            assert!(w <= capacity);
            assert_eq!(total_weight(c, &a.weights), w);
        }
        assert_eq!(v_sum.len(), 50);

        let (again, w_again, _) = repair_population(repaired.clone(), &a, capacity);
        assert_eq!(again, repaired);
        assert_eq!(w_again, w_sum);
    }
}
