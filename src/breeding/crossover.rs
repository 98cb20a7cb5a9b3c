use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chromosome::Chromosome;
use crate::error::KnapsackError;
use crate::rng::RandomNumberGenerator;

/// The recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossover {
    /// Swap the tails of both parents after one random cut.
    #[default]
    OnePoint,
    /// Pick every gene from either parent according to a random mask.
    Uniform,
}

impl Crossover {
    /// Recombines two parents into two children.
    ///
    /// With probability `1 - pc` the children are plain copies of the parents.
    pub fn apply(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        pc: f64,
        rng: &mut RandomNumberGenerator,
    ) -> (Chromosome, Chromosome) {
        match self {
            Crossover::OnePoint => one_point_crossover(parent1, parent2, pc, rng),
            Crossover::Uniform => uniform_crossover(parent1, parent2, pc, rng),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crossover::OnePoint => f.write_str("one_point"),
            Crossover::Uniform => f.write_str("uniform"),
        }
    }
}

impl FromStr for Crossover {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "one_point" => Ok(Crossover::OnePoint),
            "uniform" => Ok(Crossover::Uniform),
            other => Err(KnapsackError::Configuration(format!(
                "crossover: unknown crossover operator `{}`",
                other
            ))),
        }
    }
}

/// One-point crossover.
///
/// The cut is drawn uniformly from `[1, n - 1]`; child 1 is `p1[..cut] + p2[cut..]`
/// and child 2 the opposite. Chromosomes shorter than two genes are copied
/// without consuming any randomness.
pub fn one_point_crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    pc: f64,
    rng: &mut RandomNumberGenerator,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    if n < 2 || rng.gen_unit() >= pc {
        return (parent1.clone(), parent2.clone());
    }

    let cut = rng.gen_between(1, n);
    let (head1, tail1) = parent1.genes().split_at(cut);
    let (head2, tail2) = parent2.genes().split_at(cut);

    let child1 = Chromosome::new([head1, tail2].concat());
    let child2 = Chromosome::new([head2, tail1].concat());
    (child1, child2)
}

/// Uniform crossover.
///
/// A random mask of `n` bits is drawn; child 1 takes parent 1's gene where the
/// mask is set and parent 2's otherwise, child 2 is the complement.
pub fn uniform_crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    pc: f64,
    rng: &mut RandomNumberGenerator,
) -> (Chromosome, Chromosome) {
    if rng.gen_unit() >= pc {
        return (parent1.clone(), parent2.clone());
    }

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();
    for i in 0..parent1.len() {
        if !rng.gen_bit() {
            child1.set(i, parent2.get(i));
            child2.set(i, parent1.get(i));
        }
    }
    (child1, child2)
}
