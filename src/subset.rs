//! # Subset Sampling
//!
//! Trims an instance down to a smaller item set for quick experiments. The
//! sampling generator is seeded from the subset configuration and is unrelated
//! to the random stream of any run.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::instance::Instance;

/// How items are picked when subsetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsetMode {
    #[default]
    None,
    Random,
    FirstK,
}

impl SubsetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubsetMode::None => "none",
            SubsetMode::Random => "random",
            SubsetMode::FirstK => "first_k",
        }
    }
}

/// Subset sampling settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubsetConfig {
    #[serde(default)]
    pub mode: SubsetMode,
    /// Maximum number of items kept.
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub seed: u64,
}

/// Applies the subset rules and returns a new instance.
///
/// Kept items stay in their original order. Metadata is annotated with
/// `subset_applied`, `subset_mode` and `subset_size` whenever a subset is taken.
pub fn apply_subset(instance: &Instance, config: &SubsetConfig) -> Instance {
    let n = instance.items.len();
    let k = config.size.min(n);

    let items = match config.mode {
        SubsetMode::None => return instance.clone(),
        SubsetMode::FirstK => instance.items[..k].to_vec(),
        SubsetMode::Random => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            let mut indices: Vec<usize> = (0..n).collect();
            indices.shuffle(&mut rng);
            let mut picked = indices[..k].to_vec();
            picked.sort_unstable();
            picked.into_iter().map(|i| instance.items[i].clone()).collect()
        }
    };

    let mut meta = instance.meta.clone().unwrap_or_else(Map::new);
    meta.insert("subset_applied".into(), Value::Bool(true));
    meta.insert("subset_mode".into(), Value::from(config.mode.as_str()));
    meta.insert("subset_size".into(), Value::from(k));

    Instance {
        capacity: instance.capacity,
        items,
        meta: Some(meta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Item;

    fn instance(n: usize) -> Instance {
        Instance::new(
            100.0,
            (0..n)
                .map(|i| Item::new(i as i64, 1.0 + i as f64, 2.0 * i as f64))
                .collect(),
        )
    }

    #[test]
    fn test_none_is_identity() {
        let inst = instance(5);
        let out = apply_subset(&inst, &SubsetConfig::default());
        assert_eq!(out, inst);
    }

    #[test]
    fn test_first_k() {
        let inst = instance(10);
        let config = SubsetConfig {
            mode: SubsetMode::FirstK,
            size: 3,
            seed: 0,
        };
        let out = apply_subset(&inst, &config);
        let ids: Vec<i64> = out.items.iter().map(|it| it.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        let meta = out.meta.unwrap();
        assert_eq!(meta["subset_applied"], Value::Bool(true));
        assert_eq!(meta["subset_mode"], Value::from("first_k"));
        assert_eq!(meta["subset_size"], Value::from(3));
        // the source instance is untouched
        assert_eq!(inst.items.len(), 10);
        assert!(inst.meta.is_none());
    }

    #[test]
    fn test_size_larger_than_instance() {
        let inst = instance(4);
        let config = SubsetConfig {
            mode: SubsetMode::FirstK,
            size: 50,
            seed: 0,
        };
        assert_eq!(apply_subset(&inst, &config).items.len(), 4);
    }

    #[test]
    fn test_random_is_seeded_and_ordered() {
        let inst = instance(30);
        let config = SubsetConfig {
            mode: SubsetMode::Random,
            size: 8,
            seed: 11,
        };
        let a = apply_subset(&inst, &config);
        let b = apply_subset(&inst, &config);
        assert_eq!(a, b);
        assert_eq!(a.items.len(), 8);

        let ids: Vec<i64> = a.items.iter().map(|it| it.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_mode_deserialization() {
        let config: SubsetConfig =
            serde_json::from_str(r#"{"mode": "first_k", "size": 2}"#).unwrap();
        assert_eq!(config.mode, SubsetMode::FirstK);
        assert_eq!(config.seed, 0);
        assert!(serde_json::from_str::<SubsetConfig>(r#"{"mode": "every_other"}"#).is_err());
    }
}
