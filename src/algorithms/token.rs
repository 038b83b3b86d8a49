//! Token-set (Jaccard) similarity
//!
//! Splits on whitespace, collapses duplicates and ignores order, so
//! "kartalı anadolu" and "anadolu kartalı anadolu" share the same set.

use ahash::AHashSet;

/// Whitespace token set of a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet<'a> {
    tokens: AHashSet<&'a str>,
}

impl<'a> TokenSet<'a> {
    #[must_use]
    pub fn new(s: &'a str) -> Self {
        Self {
            tokens: s.split_whitespace().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty.
    #[must_use]
    pub fn jaccard(&self, other: &TokenSet<'_>) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (&self.tokens, &other.tokens)
        } else {
            (&other.tokens, &self.tokens)
        };
        let intersection = small.iter().filter(|t| large.contains(*t)).count();
        let union = small.len() + large.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}

/// Jaccard similarity of the whitespace token sets of `a` and `b`.
#[inline]
#[must_use]
pub fn token_set_similarity(a: &str, b: &str) -> f64 {
    TokenSet::new(a).jaccard(&TokenSet::new(b))
}
