//! Text normalization before comparison
//!
//! Only case folding is applied. Whitespace is left untouched so that
//! token splitting later sees the original word boundaries, and the
//! caller's original string is never modified.

use std::borrow::Cow;

/// Case-folding normalizer.
///
/// Uses Unicode simple lower-casing with no locale tailoring, so the
/// search term and every candidate fold the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer;

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Normalize a single string.
    ///
    /// Returns the input borrowed when folding would not change it.
    #[must_use]
    pub fn normalize<'a>(&self, s: &'a str) -> Cow<'a, str> {
        normalize_string(s)
    }
}

/// Case-fold a string for comparison.
#[must_use]
pub fn normalize_string(s: &str) -> Cow<'_, str> {
    if s.chars().all(folds_to_itself) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

#[inline]
fn folds_to_itself(c: char) -> bool {
    if c.is_ascii() {
        return !c.is_ascii_uppercase();
    }
    let mut lower = c.to_lowercase();
    lower.next() == Some(c) && lower.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        assert_eq!(normalize_string("Hello World"), "hello world");
    }

    #[test]
    fn test_whitespace_preserved() {
        assert_eq!(normalize_string("  Anadolu   KARTALI "), "  anadolu   kartali ");
    }

    #[test]
    fn test_borrowed_when_already_folded() {
        assert!(matches!(normalize_string("already lower"), Cow::Borrowed(_)));
        assert!(matches!(normalize_string("Not Lower"), Cow::Owned(_)));
    }

    #[test]
    fn test_non_ascii_folding() {
        assert_eq!(normalize_string("ÇİÇEK"), "çi\u{307}çek");
        assert_eq!(normalize_string("Kartalı"), "kartalı");
    }

    #[test]
    fn test_normalizer_struct() {
        assert_eq!(Normalizer::new().normalize("MiXeD"), "mixed");
    }
}
