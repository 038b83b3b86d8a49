//! Jaro and Jaro-Winkler similarity
//!
//! The default orthographic metric for mark comparison. Jaro tolerates
//! transpositions within a sliding window; Winkler adds a bonus for a
//! shared prefix, which matters for marks since the leading syllables
//! carry most of the visual impression.
//!
//! ASCII inputs are compared byte-wise, everything else per `char`. Both
//! paths run the same generic routine so results are identical.

use super::Similarity;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default Winkler prefix weight
pub const DEFAULT_PREFIX_WEIGHT: f64 = 0.1;
/// Default number of leading characters eligible for the prefix bonus
pub const DEFAULT_MAX_PREFIX: usize = 4;
/// Upper bound on the prefix weight that keeps scores within [0.0, 1.0]
pub const MAX_PREFIX_WEIGHT: f64 = 0.25;

/// Jaro-Winkler similarity calculator
///
/// # Parameters
/// - `prefix_weight`: How much to boost prefix matches (0.0-0.25, typically 0.1)
/// - `max_prefix_length`: Maximum prefix length to consider (typically 4)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JaroWinkler {
    pub prefix_weight: f64,
    pub max_prefix_length: usize,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self {
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
            max_prefix_length: DEFAULT_MAX_PREFIX,
        }
    }
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values outside [0.0, 0.25] are clamped.
    #[must_use]
    pub fn with_prefix_weight(mut self, weight: f64) -> Self {
        self.prefix_weight = weight.clamp(0.0, MAX_PREFIX_WEIGHT);
        self
    }

    #[must_use]
    pub fn with_max_prefix_length(mut self, length: usize) -> Self {
        self.max_prefix_length = length;
        self
    }
}

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        jaro_winkler_similarity_params(a, b, self.prefix_weight, self.max_prefix_length)
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

/// Calculate Jaro similarity between two strings.
/// Returns a value between 0.0 and 1.0.
#[inline]
#[must_use]
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_ascii() && b.is_ascii() {
        return jaro_slices(a.as_bytes(), b.as_bytes());
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    jaro_slices(&a_chars, &b_chars)
}

/// Jaro over any comparable units.
fn jaro_slices<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; a.len()];
    let mut b_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; b.len()];

    let mut matches = 0usize;
    for (i, unit) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if !b_matched[j] && b[j] == *unit {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched units of `a` and `b`, each in order; mismatched pairs are half-transpositions.
    let a_seq = a.iter().zip(a_matched.iter()).filter(|(_, m)| **m).map(|(u, _)| u);
    let b_seq = b.iter().zip(b_matched.iter()).filter(|(_, m)| **m).map(|(u, _)| u);
    let half_transpositions = a_seq.zip(b_seq).filter(|(x, y)| x != y).count();

    let m = matches as f64;
    let t = (half_transpositions / 2) as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

/// Calculate Jaro-Winkler similarity with custom parameters.
/// `prefix_weight` is clamped to [0.0, 0.25] so the result stays in [0.0, 1.0].
#[inline]
#[must_use]
pub fn jaro_winkler_similarity_params(
    a: &str,
    b: &str,
    prefix_weight: f64,
    max_prefix_len: usize,
) -> f64 {
    let jaro = jaro_similarity(a, b);
    if jaro == 0.0 || jaro == 1.0 {
        return jaro;
    }

    let prefix_weight = prefix_weight.clamp(0.0, MAX_PREFIX_WEIGHT);
    let prefix_len = a
        .chars()
        .zip(b.chars())
        .take(max_prefix_len)
        .take_while(|(x, y)| x == y)
        .count();

    jaro + prefix_len as f64 * prefix_weight * (1.0 - jaro)
}

/// Calculate Jaro-Winkler similarity with default parameters.
#[inline]
#[must_use]
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    jaro_winkler_similarity_params(a, b, DEFAULT_PREFIX_WEIGHT, DEFAULT_MAX_PREFIX)
}
