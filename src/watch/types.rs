//! Result types produced by a watch run

use serde::{Deserialize, Serialize};

/// How a candidate matched the search term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Normalized search term is a substring of the normalized candidate
    Exact,
    /// Scored by the weighted sub-metrics
    Similar,
}

impl MatchType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Similar => "similar",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for one candidate mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Candidate exactly as supplied, not normalized
    pub mark: String,
    /// 1.0 for exact matches, rounded weighted aggregate otherwise
    pub score: f64,
    pub match_type: MatchType,
}

impl MatchResult {
    #[must_use]
    pub fn exact(mark: impl Into<String>) -> Self {
        Self {
            mark: mark.into(),
            score: 1.0,
            match_type: MatchType::Exact,
        }
    }

    #[must_use]
    pub fn similar(mark: impl Into<String>, score: f64) -> Self {
        Self {
            mark: mark.into(),
            score,
            match_type: MatchType::Similar,
        }
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.match_type == MatchType::Exact
    }
}

/// The three sub-scores behind a similar match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub phonetic: f64,
    pub string: f64,
    pub token: f64,
}

/// A [`MatchResult`] together with the sub-scores that produced it.
///
/// `sub_scores` is `None` for exact matches since the sub-metrics are
/// skipped once containment is found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub result: MatchResult,
    pub sub_scores: Option<SubScores>,
}

/// Ranked matches for one tracked term of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHit {
    pub term: String,
    pub matches: Vec<MatchResult>,
}
