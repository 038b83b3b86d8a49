//! Final ordering of per-candidate results

use super::types::MatchResult;
use crate::config::Threshold;

/// Counts gathered while ranking, used for run logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankStats {
    pub exact: usize,
    pub similar_kept: usize,
    pub similar_dropped: usize,
}

/// Order results for output.
///
/// Exact matches come first in their original order. Similar matches
/// below `threshold` are dropped and the rest follow by descending score.
/// The sort is stable, so equal scores keep their input order.
#[must_use]
pub fn rank_results(results: Vec<MatchResult>, threshold: Threshold) -> Vec<MatchResult> {
    rank_results_with_stats(results, threshold).0
}

/// [`rank_results`] plus the partition counts.
#[must_use]
pub fn rank_results_with_stats(
    results: Vec<MatchResult>,
    threshold: Threshold,
) -> (Vec<MatchResult>, RankStats) {
    let total = results.len();
    let (mut ranked, similar): (Vec<_>, Vec<_>) =
        results.into_iter().partition(MatchResult::is_exact);
    let exact = ranked.len();

    let mut similar: Vec<MatchResult> = similar
        .into_iter()
        .filter(|r| threshold.admits(r.score))
        .collect();
    similar.sort_by(|a, b| b.score.total_cmp(&a.score));

    let stats = RankStats {
        exact,
        similar_kept: similar.len(),
        similar_dropped: total - exact - similar.len(),
    };
    ranked.append(&mut similar);
    (ranked, stats)
}
