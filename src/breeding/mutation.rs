use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chromosome::Chromosome;
use crate::error::KnapsackError;
use crate::rng::RandomNumberGenerator;

/// The mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    #[default]
    BitFlip,
}

impl Mutation {
    /// Mutates `chromosome` in place with per-gene probability `pm`.
    pub fn apply(&self, chromosome: &mut Chromosome, pm: f64, rng: &mut RandomNumberGenerator) {
        match self {
            Mutation::BitFlip => bit_flip_mutation(chromosome, pm, rng),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::BitFlip => f.write_str("bit_flip"),
        }
    }
}

impl FromStr for Mutation {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bit_flip" => Ok(Mutation::BitFlip),
            other => Err(KnapsackError::Configuration(format!(
                "mutation: unknown mutation operator `{}`",
                other
            ))),
        }
    }
}

/// Flips every gene independently with probability `pm`.
///
/// One uniform draw is consumed per gene whether or not it flips.
pub fn bit_flip_mutation(chromosome: &mut Chromosome, pm: f64, rng: &mut RandomNumberGenerator) {
    for i in 0..chromosome.len() {
        if rng.gen_unit() < pm {
            chromosome.flip(i);
        }
    }
}

const INVERSE_LENGTH: &str = "1/n";

/// Per-gene mutation probability: a literal or one over the item count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMutationRate", into = "RawMutationRate")]
pub enum MutationRate {
    Fixed(f64),
    InverseLength,
}

impl MutationRate {
    /// Resolves the rate for chromosomes of length `n`.
    pub fn resolve(&self, n: usize) -> f64 {
        match self {
            MutationRate::Fixed(pm) => *pm,
            MutationRate::InverseLength => 1.0 / n.max(1) as f64,
        }
    }
}

impl Default for MutationRate {
    fn default() -> Self {
        MutationRate::InverseLength
    }
}

impl fmt::Display for MutationRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationRate::Fixed(pm) => write!(f, "{}", pm),
            MutationRate::InverseLength => f.write_str(INVERSE_LENGTH),
        }
    }
}

impl FromStr for MutationRate {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == INVERSE_LENGTH {
            return Ok(MutationRate::InverseLength);
        }
        match s.parse::<f64>() {
            Ok(pm) => MutationRate::try_from(RawMutationRate::Number(pm)),
            Err(_) => Err(KnapsackError::Configuration(format!(
                "pm: expected \"1/n\" or a number in [0, 1], got `{}`",
                s
            ))),
        }
    }
}

/// Wire form of [`MutationRate`]: a JSON number or the string `"1/n"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMutationRate {
    Number(f64),
    Text(String),
}

impl TryFrom<RawMutationRate> for MutationRate {
    type Error = KnapsackError;

    fn try_from(raw: RawMutationRate) -> Result<Self, Self::Error> {
        match raw {
            RawMutationRate::Number(pm) if (0.0..=1.0).contains(&pm) => Ok(MutationRate::Fixed(pm)),
            RawMutationRate::Number(pm) => Err(KnapsackError::Configuration(format!(
                "pm: literal rate must be in [0, 1], got {}",
                pm
            ))),
            RawMutationRate::Text(text) if text.trim() == INVERSE_LENGTH => {
                Ok(MutationRate::InverseLength)
            }
            RawMutationRate::Text(text) => Err(KnapsackError::Configuration(format!(
                "pm: unknown mutation rate policy `{}`",
                text
            ))),
        }
    }
}

impl From<MutationRate> for RawMutationRate {
    fn from(rate: MutationRate) -> Self {
        match rate {
            MutationRate::Fixed(pm) => RawMutationRate::Number(pm),
            MutationRate::InverseLength => RawMutationRate::Text(INVERSE_LENGTH.to_string()),
        }
    }
}
