//! # Problem Instances
//!
//! An [`Instance`] is a knapsack capacity plus an ordered list of [`Item`]s and
//! free-form metadata. The optimizer never reads items directly; it works on the
//! flat [`ItemArrays`] derived once per run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{KnapsackError, Result};

/// A single item that may be packed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub weight: f64,
    pub value: f64,
}

impl Item {
    pub fn new(id: i64, weight: f64, value: f64) -> Self {
        Self { id, weight, value }
    }
}

/// A knapsack problem: capacity, items and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub capacity: f64,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl Instance {
    /// Creates an instance without metadata.
    pub fn new(capacity: f64, items: Vec<Item>) -> Self {
        Self {
            capacity,
            items,
            meta: None,
        }
    }

    /// Attaches metadata, replacing any existing map.
    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Returns the number of items.
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the instance name from metadata, or `"?"`.
    pub fn name(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("?")
    }

    /// Checks the data model constraints: positive finite capacity, positive
    /// weights and non-negative values.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::InvalidInstance` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return Err(KnapsackError::InvalidInstance(format!(
                "capacity must be > 0, got {}",
                self.capacity
            )));
        }

        for item in &self.items {
            if !(item.weight.is_finite() && item.weight > 0.0) {
                return Err(KnapsackError::InvalidInstance(format!(
                    "item {}: weight must be > 0, got {}",
                    item.id, item.weight
                )));
            }
            if !(item.value.is_finite() && item.value >= 0.0) {
                return Err(KnapsackError::InvalidInstance(format!(
                    "item {}: value must be >= 0, got {}",
                    item.id, item.value
                )));
            }
        }

        Ok(())
    }
}

/// Dense weight and value vectors aligned by item index.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemArrays {
    pub weights: Vec<f64>,
    pub values: Vec<f64>,
}

impl ItemArrays {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Builds the weight/value vectors of an instance.
pub fn build_item_arrays(instance: &Instance) -> ItemArrays {
    let (weights, values) = instance
        .items
        .iter()
        .map(|item| (item.weight, item.value))
        .unzip();
    ItemArrays { weights, values }
}
