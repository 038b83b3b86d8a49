//! Watch run configuration
//!
//! Weights and threshold are validated when they are built, so a
//! [`BrandWatch`](crate::watch::BrandWatch) never sees a negative weight
//! or a threshold outside [0.0, 1.0].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default phonetic weight
pub const DEFAULT_PHONETIC_WEIGHT: f64 = 0.4;
/// Default orthographic weight
pub const DEFAULT_STRING_WEIGHT: f64 = 0.4;
/// Default token-overlap weight
pub const DEFAULT_TOKEN_WEIGHT: f64 = 0.2;
/// Default relevance threshold for similar matches
pub const DEFAULT_THRESHOLD: f64 = 0.70;

/// Minimum candidate count for parallel scoring.
///
/// Below this, rayon's coordination overhead outweighs the per-candidate
/// cost of three cheap string metrics.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Weights for the three sub-scores.
///
/// Weights need not sum to 1.0. When they do, aggregate scores stay in
/// [0.0, 1.0]; otherwise the caller owns the resulting scale.
///
/// When deserialized, all three keys are required and any other key is an
/// error, so a misspelled weight never falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    pub phonetic: f64,
    pub string: f64,
    pub token: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            phonetic: DEFAULT_PHONETIC_WEIGHT,
            string: DEFAULT_STRING_WEIGHT,
            token: DEFAULT_TOKEN_WEIGHT,
        }
    }
}

impl WeightConfig {
    /// Build a validated weight set.
    pub fn new(phonetic: f64, string: f64, token: f64) -> Result<Self, ConfigError> {
        let weights = Self {
            phonetic,
            string,
            token,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check every weight is finite and non-negative, and not all are zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeWeight { name, value });
            }
        }
        if self.sum() == 0.0 {
            return Err(ConfigError::AllWeightsZero);
        }
        Ok(())
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.phonetic + self.string + self.token
    }

    /// Weighted sum of the three sub-scores, unclamped.
    #[inline]
    #[must_use]
    pub fn aggregate(&self, phonetic: f64, string: f64, token: f64) -> f64 {
        phonetic * self.phonetic + string * self.string + token * self.token
    }

    fn named(&self) -> [(&'static str, f64); 3] {
        [
            ("phonetic", self.phonetic),
            ("string", self.string),
            ("token", self.token),
        ]
    }
}

/// Minimum score a similar match needs to be reported.
///
/// Exact matches are never filtered by it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::ThresholdOutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when `score` clears the threshold (inclusive).
    #[inline]
    #[must_use]
    pub fn admits(self, score: f64) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// Complete configuration for a watch run.
///
/// Omitted sections take their defaults; unknown keys are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    pub weights: WeightConfig,
    pub threshold: Threshold,
    /// Candidate lists at least this long are scored in parallel.
    pub parallel_threshold: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            threshold: Threshold::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl WatchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_weights(mut self, weights: WeightConfig) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Use `usize::MAX` to always score sequentially, 0 to always go parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Re-check the weights, which are plain fields and may have been
    /// assigned or deserialized without validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()
    }
}
