//! MarkWatch - trademark watch screening
//!
//! Checks whether a tracked phrase from a trademark portfolio appears,
//! exactly or approximately, among the candidate marks of a bulletin.
//!
//! # Features
//! - Literal containment detection with absolute priority
//! - Phonetic (Double Metaphone), orthographic (Jaro-Winkler) and
//!   token-overlap (Jaccard) sub-scores combined by configurable weights
//! - Stable ranking: exact matches first, then similar matches by score
//! - Parallel scoring of large bulletins with identical output
//! - Optional Python bindings (`python` feature)
//!
//! # Example
//! ```
//! use markwatch::{run_brand_watch, MatchType, WatchConfig};
//!
//! let results = run_brand_watch(
//!     "Anadolu Kartalı",
//!     &["Anadolu Kartalı İçecek Sanayi", "Avrupa Kaplanı"],
//!     &WatchConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].match_type, MatchType::Exact);
//! assert_eq!(results[0].score, 1.0);
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod watch;

#[cfg(feature = "python")]
mod python;

pub use algorithms::{PhoneticCode, PhoneticEncoder, Similarity};
pub use config::{Threshold, WatchConfig, WeightConfig};
pub use error::{ConfigError, Result, WatchError};
pub use watch::{BrandWatch, CandidateEvaluation, MatchResult, MatchType, PortfolioHit, SubScores};

/// Screen a bulletin for one search term with the default primitives.
///
/// Returns exact matches in candidate order followed by similar matches
/// at or above `config.threshold`, highest score first. An empty candidate
/// list yields an empty result.
///
/// # Errors
/// [`WatchError::Config`] when the weights are invalid and
/// [`WatchError::EmptySearchTerm`] when the search term is empty.
pub fn run_brand_watch<C: AsRef<str> + Sync>(
    search_term: &str,
    candidate_marks: &[C],
    config: &WatchConfig,
) -> Result<Vec<MatchResult>> {
    BrandWatch::with_config(*config)?.run(search_term, candidate_marks)
}
