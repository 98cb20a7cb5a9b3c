//! # Chromosome
//!
//! A [`Chromosome`] is one candidate packing: a fixed-length vector of binary
//! genes where gene `i` says whether item `i` is included. A [`Population`] is
//! an ordered vector of chromosomes of equal length.

use std::fmt;

use crate::rng::RandomNumberGenerator;

/// A binary inclusion vector over the items of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    genes: Vec<bool>,
}

/// An ordered collection of chromosomes.
pub type Population = Vec<Chromosome>;

impl Chromosome {
    pub fn new(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// A chromosome with no items selected.
    pub fn empty(n: usize) -> Self {
        Self {
            genes: vec![false; n],
        }
    }

    /// Draws every gene independently from a fair coin.
    pub fn random(n: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            genes: (0..n).map(|_| rng.gen_bit()).collect(),
        }
    }

    /// Parses a `'0'`/`'1'` string; any other character yields `None`.
    pub fn from_bit_string(bits: &str) -> Option<Self> {
        bits.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<bool>>>()
            .map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn get(&self, index: usize) -> bool {
        self.genes[index]
    }

    pub fn set(&mut self, index: usize, included: bool) {
        self.genes[index] = included;
    }

    pub fn flip(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }

    /// Indices of the included items, ascending.
    pub fn included(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| g.then_some(i))
    }

    pub fn count_included(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Encodes the genes as one `'0'`/`'1'` character per item, in item order.
    pub fn to_bit_string(&self) -> String {
        self.genes.iter().map(|&g| if g { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Builds a population of `size` random chromosomes of length `n`.
pub fn init_population(size: usize, n: usize, rng: &mut RandomNumberGenerator) -> Population {
    (0..size).map(|_| Chromosome::random(n, rng)).collect()
}
