//! Error types
//!
//! Only configuration and argument problems surface as errors. Failures
//! inside the similarity primitives are absorbed into a neutral score.

use thiserror::Error;

/// Invalid weight or threshold configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A weight is below zero
    #[error("weight '{name}' must be non-negative, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },

    /// A weight is NaN or infinite
    #[error("weight '{name}' must be a finite number, got {value}")]
    NonFiniteWeight { name: &'static str, value: f64 },

    /// Every weight is zero, so every score would be zero
    #[error("at least one weight must be greater than zero")]
    AllWeightsZero,

    /// Threshold is NaN or outside [0.0, 1.0]
    #[error("threshold must be in range [0.0, 1.0], got {0}")]
    ThresholdOutOfRange(f64),
}

/// Errors returned by a watch run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The search term is the empty string
    #[error("search term must not be empty")]
    EmptySearchTerm,
}

pub type Result<T, E = WatchError> = std::result::Result<T, E>;
