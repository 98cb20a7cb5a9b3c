//! # Parent Selection
//!
//! Selection picks the index of one parent from the current population given
//! its fitness vector. Two schemes are supported, tournament and roulette, plus
//! the deterministic elite picker used for elitism.
//!
//! All selection draws come from the run's [`RandomNumberGenerator`], so the
//! chosen indices are reproducible for a fixed seed.

pub mod elitist;
pub mod roulette;
pub mod tournament;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KnapsackError, Result};
use crate::rng::RandomNumberGenerator;

pub use elitist::elite_indices;
pub use roulette::roulette_select;
pub use tournament::tournament_select;

/// The selection scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    #[default]
    Tournament,
    Roulette,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Tournament => f.write_str("tournament"),
            SelectionKind::Roulette => f.write_str("roulette"),
        }
    }
}

impl FromStr for SelectionKind {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "tournament" => Ok(SelectionKind::Tournament),
            "roulette" => Ok(SelectionKind::Roulette),
            other => Err(KnapsackError::Configuration(format!(
                "selection.type: unknown selection type `{}`",
                other
            ))),
        }
    }
}

fn default_tournament_size() -> usize {
    3
}

/// Selection settings. `k` is only read by tournament selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(rename = "type", default)]
    pub kind: SelectionKind,
    #[serde(default = "default_tournament_size")]
    pub k: usize,
}

impl SelectionConfig {
    pub fn tournament(k: usize) -> Self {
        Self {
            kind: SelectionKind::Tournament,
            k,
        }
    }

    pub fn roulette() -> Self {
        Self {
            kind: SelectionKind::Roulette,
            k: default_tournament_size(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::tournament(default_tournament_size())
    }
}

/// Selects the index of one parent according to `config`.
///
/// # Errors
///
/// Returns `KnapsackError::EmptyPopulation` if `fitness` is empty.
pub fn select_parent(
    fitness: &[f64],
    config: &SelectionConfig,
    rng: &mut RandomNumberGenerator,
) -> Result<usize> {
    match config.kind {
        SelectionKind::Tournament => tournament_select(fitness, config.k, rng),
        SelectionKind::Roulette => roulette_select(fitness, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_parent_dispatch() {
        let fitness = vec![1.0, 9.0, 3.0];

        let mut rng = RandomNumberGenerator::from_seed(1);
        let idx = select_parent(&fitness, &SelectionConfig::tournament(50), &mut rng).unwrap();
        assert_eq!(idx, 1);

        let mut rng = RandomNumberGenerator::from_seed(1);
        let idx = select_parent(&fitness, &SelectionConfig::roulette(), &mut rng).unwrap();
        assert!(idx < 3);
    }

    #[test]
    fn test_selection_kind_from_str() {
        assert_eq!("roulette".parse::<SelectionKind>().unwrap(), SelectionKind::Roulette);
        match "rank".parse::<SelectionKind>() {
            Err(KnapsackError::Configuration(msg)) => assert!(msg.contains("selection.type")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_selection_config_deserialization() {
        let config: SelectionConfig = serde_json::from_str(r#"{"type": "roulette"}"#).unwrap();
        assert_eq!(config.kind, SelectionKind::Roulette);
        assert_eq!(config.k, 3);

        let config: SelectionConfig =
            serde_json::from_str(r#"{"type": "tournament", "k": 5}"#).unwrap();
        assert_eq!(config, SelectionConfig::tournament(5));

        assert!(serde_json::from_str::<SelectionConfig>(r#"{"type": "rank"}"#).is_err());
    }
}
