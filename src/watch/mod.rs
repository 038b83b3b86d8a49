//! Trademark watch pipeline
//!
//! For each candidate mark: normalize, check literal containment, and on
//! a miss compute phonetic, orthographic and token sub-scores and their
//! weighted aggregate. Results are then ranked with exact matches first.
//!
//! Candidates are independent, so large bulletins are scored in parallel.
//! Sequential and parallel runs return identical output.

pub mod rank;
pub mod scoring;
pub mod types;

use rayon::prelude::*;
use tracing::debug;

use crate::algorithms::{DoubleMetaphone, JaroWinkler, Normalizer, PhoneticEncoder, Similarity};
use crate::config::WatchConfig;
use crate::error::{Result, WatchError};

pub use rank::{rank_results, RankStats};
pub use types::{CandidateEvaluation, MatchResult, MatchType, PortfolioHit, SubScores};

/// Configured watch over a bulletin.
///
/// Generic over the phonetic encoder and orthographic metric so that
/// alternate algorithms can be swapped in. Holds no per-run state and can
/// be shared across threads.
///
/// # Example
/// ```
/// use markwatch::watch::{BrandWatch, MatchType};
///
/// let watch = BrandWatch::new();
/// let results = watch
///     .run("Anadolu Kartalı", &["Anadolu Kartalı İçecek Sanayi", "Avrupa Kaplanı"])
///     .unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].match_type, MatchType::Exact);
/// ```
#[derive(Debug, Clone)]
pub struct BrandWatch<P = DoubleMetaphone, S = JaroWinkler> {
    config: WatchConfig,
    normalizer: Normalizer,
    encoder: P,
    metric: S,
}

impl BrandWatch {
    /// Watch with default weights, threshold and primitives.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: WatchConfig::default(),
            normalizer: Normalizer::new(),
            encoder: DoubleMetaphone::new(),
            metric: JaroWinkler::new(),
        }
    }

    /// Watch with default primitives and a validated configuration.
    pub fn with_config(config: WatchConfig) -> Result<Self> {
        Self::with_primitives(config, DoubleMetaphone::new(), JaroWinkler::new())
    }
}

impl Default for BrandWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PhoneticEncoder, S: Similarity> BrandWatch<P, S> {
    /// Watch with caller-supplied primitives.
    pub fn with_primitives(config: WatchConfig, encoder: P, metric: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            normalizer: Normalizer::new(),
            encoder,
            metric,
        })
    }

    #[must_use]
    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Screen `candidates` against `search_term` and return ranked matches.
    ///
    /// Exact matches come first in candidate order, followed by similar
    /// matches at or above the threshold by descending score.
    pub fn run<C: AsRef<str> + Sync>(&self, search_term: &str, candidates: &[C]) -> Result<Vec<MatchResult>> {
        let term = self.prepare_term(search_term)?;
        let span = tracing::debug_span!(
            "markwatch.run",
            search_term,
            candidates = candidates.len()
        );
        let _guard = span.enter();

        let parallel = candidates.len() >= self.config.parallel_threshold;
        let results = self.score_all(&term, candidates, parallel);
        let (ranked, stats) = rank::rank_results_with_stats(results, self.config.threshold);

        debug!(
            exact = stats.exact,
            similar_kept = stats.similar_kept,
            similar_dropped = stats.similar_dropped,
            parallel,
            "watch complete"
        );
        Ok(ranked)
    }

    /// Score one candidate and report the sub-scores behind it.
    pub fn evaluate(&self, search_term: &str, candidate: &str) -> Result<CandidateEvaluation> {
        let term = self.prepare_term(search_term)?;
        Ok(self.evaluate_normalized(&term, candidate))
    }

    /// Run the watch once per tracked term against the same bulletin.
    ///
    /// Every term is checked before any scoring starts, so one empty term
    /// rejects the whole portfolio.
    pub fn run_portfolio<T, C>(&self, terms: &[T], candidates: &[C]) -> Result<Vec<PortfolioHit>>
    where
        T: AsRef<str>,
        C: AsRef<str> + Sync,
    {
        let prepared = terms
            .iter()
            .map(|t| self.prepare_term(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let parallel = candidates.len() >= self.config.parallel_threshold;
        let hits = terms
            .iter()
            .zip(prepared)
            .map(|(original, term)| {
                let results = self.score_all(&term, candidates, parallel);
                PortfolioHit {
                    term: original.as_ref().to_string(),
                    matches: rank_results(results, self.config.threshold),
                }
            })
            .collect();
        debug!(terms = terms.len(), candidates = candidates.len(), "portfolio watch complete");
        Ok(hits)
    }

    fn prepare_term(&self, search_term: &str) -> Result<String> {
        if search_term.is_empty() {
            return Err(WatchError::EmptySearchTerm);
        }
        Ok(self.normalizer.normalize(search_term).into_owned())
    }

    /// Per-candidate results in candidate order.
    fn score_all<C: AsRef<str> + Sync>(&self, term: &str, candidates: &[C], parallel: bool) -> Vec<MatchResult> {
        if parallel {
            candidates
                .par_iter()
                .map(|c| self.evaluate_normalized(term, c.as_ref()).result)
                .collect()
        } else {
            candidates
                .iter()
                .map(|c| self.evaluate_normalized(term, c.as_ref()).result)
                .collect()
        }
    }

    fn evaluate_normalized(&self, term: &str, candidate: &str) -> CandidateEvaluation {
        let normalized = self.normalizer.normalize(candidate);
        if scoring::is_exact_match(term, &normalized) {
            return CandidateEvaluation {
                result: MatchResult::exact(candidate),
                sub_scores: None,
            };
        }

        let sub = SubScores {
            phonetic: scoring::phonetic_score(&self.encoder, term, &normalized),
            string: scoring::string_score(&self.metric, term, &normalized),
            token: scoring::token_score(term, &normalized),
        };
        let score = scoring::aggregate_score(&self.config.weights, sub.phonetic, sub.string, sub.token);
        CandidateEvaluation {
            result: MatchResult::similar(candidate, score),
            sub_scores: Some(sub),
        }
    }
}
