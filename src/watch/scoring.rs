//! Per-candidate scoring steps
//!
//! All functions take already-normalized text. None of them fail: a
//! primitive that cannot produce a signal contributes 0.0.

use crate::algorithms::{token_set_similarity, PhoneticEncoder, Similarity};
use crate::config::WeightConfig;

/// Decimal places kept in aggregate scores
pub const SCORE_DECIMALS: usize = 4;

/// Literal containment of the search term inside the candidate.
#[inline]
#[must_use]
pub fn is_exact_match(term: &str, candidate: &str) -> bool {
    candidate.contains(term)
}

/// 1.0 when both primary phonetic codes exist and are equal, else 0.0.
#[must_use]
pub fn phonetic_score<P: PhoneticEncoder + ?Sized>(encoder: &P, term: &str, candidate: &str) -> f64 {
    let Some(term_code) = encoder.encode(term) else {
        tracing::trace!(encoder = encoder.name(), text = term, "phonetic encoding unavailable");
        return 0.0;
    };
    let Some(candidate_code) = encoder.encode(candidate) else {
        tracing::trace!(encoder = encoder.name(), text = candidate, "phonetic encoding unavailable");
        return 0.0;
    };
    if term_code.primary_matches(&candidate_code) {
        1.0
    } else {
        0.0
    }
}

/// Orthographic similarity, passed through from the metric unmodified.
#[inline]
#[must_use]
pub fn string_score<S: Similarity + ?Sized>(metric: &S, term: &str, candidate: &str) -> f64 {
    metric.similarity(term, candidate)
}

/// Jaccard overlap of whitespace tokens.
#[inline]
#[must_use]
pub fn token_score(term: &str, candidate: &str) -> f64 {
    token_set_similarity(term, candidate)
}

/// Weighted aggregate of the sub-scores, rounded to [`SCORE_DECIMALS`].
#[inline]
#[must_use]
pub fn aggregate_score(weights: &WeightConfig, phonetic: f64, string: f64, token: f64) -> f64 {
    round_score(weights.aggregate(phonetic, string, token))
}

/// Round to [`SCORE_DECIMALS`] decimal places.
///
/// Rounds the exact stored value, so 0.30005 (held as 0.3000499...)
/// becomes 0.3. Scaling by 10^4 first would turn it into a tie at 3000.5.
#[must_use]
pub fn round_score(score: f64) -> f64 {
    if !score.is_finite() {
        return score;
    }
    format!("{:.*}", SCORE_DECIMALS, score)
        .parse()
        .unwrap_or(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{DoubleMetaphone, JaroWinkler, PhoneticCode};

    struct NeverEncodes;

    impl PhoneticEncoder for NeverEncodes {
        fn encode(&self, _text: &str) -> Option<PhoneticCode> {
            None
        }

        fn name(&self) -> &'static str {
            "never"
        }
    }

    #[test]
    fn test_exact_match_is_substring() {
        assert!(is_exact_match("anadolu kartalı", "anadolu kartalı içecek sanayi"));
        assert!(is_exact_match("kartal", "anadolu kartalı"));
        assert!(!is_exact_match("anadolu kartalı", "kartalı anadolu tekstil"));
    }

    #[test]
    fn test_phonetic_score_binary() {
        let dm = DoubleMetaphone::new();
        assert_eq!(phonetic_score(&dm, "stephen", "steven"), 1.0);
        assert_eq!(phonetic_score(&dm, "john", "mary"), 0.0);
    }

    #[test]
    fn test_phonetic_failure_is_neutral() {
        assert_eq!(phonetic_score(&NeverEncodes, "anything", "anything"), 0.0);
        let dm = DoubleMetaphone::new();
        assert_eq!(phonetic_score(&dm, "1234", "1234"), 0.0);
    }

    #[test]
    fn test_string_score_passthrough() {
        let jw = JaroWinkler::new();
        assert_eq!(string_score(&jw, "mark", "mark"), 1.0);
        assert_eq!(
            string_score(&jw, "martha", "marhta"),
            jw.similarity("martha", "marhta")
        );
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.123_449), 0.1234);
        assert_eq!(round_score(0.123_46), 0.1235);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn test_round_score_uses_stored_value() {
        assert_eq!(round_score(0.300_05), 0.3);
        assert_eq!(round_score(1.000_05), 1.0001);
        assert_eq!(round_score(0.699_95), 0.6999);
        assert!(!crate::config::Threshold::default().admits(round_score(0.699_95)));
    }

    #[test]
    fn test_aggregate_score() {
        let w = WeightConfig::default();
        assert_eq!(aggregate_score(&w, 1.0, 1.0, 1.0), 1.0);
        assert_eq!(aggregate_score(&w, 0.0, 0.0, 1.0), 0.2);
        assert_eq!(aggregate_score(&w, 0.0, 0.912_345, 0.0), 0.3649);
    }

    #[test]
    fn test_aggregate_not_clamped() {
        let w = WeightConfig::new(1.0, 1.0, 1.0).unwrap();
        assert_eq!(aggregate_score(&w, 1.0, 1.0, 1.0), 3.0);
    }
}
