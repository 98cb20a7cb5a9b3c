//! # Error Types
//!
//! This module defines the error type shared by the whole crate. Configuration
//! and instance problems are reported before a run starts; nothing that happens
//! inside the generation loop is surfaced as an error.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use knapsack_ga::error::{KnapsackError, Result};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size < 2 {
//!         return Err(KnapsackError::Configuration(
//!             "population must be at least 2".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(1).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use knapsack_ga::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_instance(path: &str) -> Result<File> {
//!     File::open(path).context("Failed to open instance file")
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use knapsack_ga::error::{KnapsackError, OptionExt};
//!
//! fn best_score(scores: &[i64]) -> knapsack_ga::error::Result<i64> {
//!     scores.iter().max().cloned().ok_or_else_knapsack(|| KnapsackError::EmptyPopulation)
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running the optimizer.
#[derive(Error, Debug)]
pub enum KnapsackError {
    /// An invalid or unrecognised configuration value was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A problem instance violates the data model (capacity, weights, values).
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// An operation required a non-empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, KnapsackError>;

/// Extension trait for Result to add context to errors.
///
/// The source error is flattened into a `KnapsackError::Other` message prefixed
/// with the given context.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| KnapsackError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to build the error.
    fn ok_or_else_knapsack<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> KnapsackError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_knapsack<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> KnapsackError,
    {
        self.ok_or_else(err_fn)
    }
}
