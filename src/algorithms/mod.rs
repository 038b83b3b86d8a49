//! Similarity primitives used by the watch pipeline
//!
//! Each primitive is a standalone function for composability, plus a
//! trait-based interface so alternate algorithms can be plugged into
//! [`BrandWatch`](crate::watch::BrandWatch) without touching the pipeline.

pub mod jaro;
pub mod normalize;
pub mod phonetic;
pub mod token;

pub use jaro::*;
pub use normalize::*;
pub use phonetic::*;
pub use token::*;

/// Trait for orthographic similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for phonetic encoders.
///
/// Encoding is fallible: text with no encodable phonetic content yields
/// `None` instead of an error, and callers treat it as "no phonetic signal".
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Option<PhoneticCode>;

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

impl<T: Similarity + ?Sized> Similarity for &T {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (**self).similarity(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: PhoneticEncoder + ?Sized> PhoneticEncoder for &T {
    fn encode(&self, text: &str) -> Option<PhoneticCode> {
        (**self).encode(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: Similarity + ?Sized> Similarity for Box<T> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (**self).similarity(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: PhoneticEncoder + ?Sized> PhoneticEncoder for Box<T> {
    fn encode(&self, text: &str) -> Option<PhoneticCode> {
        (**self).encode(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
