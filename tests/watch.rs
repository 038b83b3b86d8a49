//! End-to-end watch scenarios

use markwatch::algorithms::{jaro_winkler_similarity, token_set_similarity, DoubleMetaphone, PhoneticEncoder};
use markwatch::watch::scoring::round_score;
use markwatch::{
    run_brand_watch, BrandWatch, ConfigError, MatchResult, MatchType, Threshold, WatchConfig, WatchError,
    WeightConfig,
};

const TERM: &str = "Anadolu Kartalı";

fn default_run(candidates: &[&str]) -> Vec<MatchResult> {
    run_brand_watch(TERM, candidates, &WatchConfig::default()).unwrap()
}

/// Score recomputed from the default primitives, for comparison.
fn expected_score(term: &str, candidate: &str) -> f64 {
    let (t, c) = (term.to_lowercase(), candidate.to_lowercase());
    let dm = DoubleMetaphone::new();
    let phonetic = match (dm.encode(&t), dm.encode(&c)) {
        (Some(a), Some(b)) if a.primary == b.primary => 1.0,
        _ => 0.0,
    };
    round_score(0.4 * phonetic + 0.4 * jaro_winkler_similarity(&t, &c) + 0.2 * token_set_similarity(&t, &c))
}

#[test]
fn test_substring_is_exact() {
    let results = default_run(&["Anadolu Kartalı İçecek Sanayi"]);
    assert_eq!(
        results,
        vec![MatchResult {
            mark: "Anadolu Kartalı İçecek Sanayi".to_string(),
            score: 1.0,
            match_type: MatchType::Exact,
        }]
    );
}

#[test]
fn test_reordered_tokens_are_similar() {
    let watch = BrandWatch::new();

    let same_tokens = watch.evaluate(TERM, "Kartalı Anadolu").unwrap();
    assert_eq!(same_tokens.result.match_type, MatchType::Similar);
    assert_eq!(same_tokens.sub_scores.unwrap().token, 1.0);
    assert_eq!(same_tokens.result.score, expected_score(TERM, "Kartalı Anadolu"));

    let with_extra = watch.evaluate(TERM, "Kartalı Anadolu Tekstil").unwrap();
    assert_eq!(with_extra.result.match_type, MatchType::Similar);
    assert_eq!(
        with_extra.result.score,
        expected_score(TERM, "Kartalı Anadolu Tekstil")
    );

    let results = default_run(&["Kartalı Anadolu Tekstil"]);
    let included = with_extra.result.score >= 0.70;
    assert_eq!(results.len(), usize::from(included));
}

#[test]
fn test_unrelated_mark_excluded() {
    let watch = BrandWatch::new();
    let eval = watch.evaluate(TERM, "Avrupa Kaplanı").unwrap();
    let sub = eval.sub_scores.unwrap();
    assert_eq!(sub.token, 0.0);
    assert!(eval.result.score < 0.70);
    assert!(default_run(&["Avrupa Kaplanı"]).is_empty());
}

#[test]
fn test_empty_candidate_list() {
    let empty: [&str; 0] = [];
    assert!(default_run(&empty).is_empty());
}

#[test]
fn test_same_token_without_containment() {
    // Trailing space keeps the term from being a substring of the candidate
    let watch = BrandWatch::new();
    let eval = watch.evaluate("Efes ", "EFES").unwrap();
    assert_eq!(eval.result.match_type, MatchType::Similar);
    let sub = eval.sub_scores.unwrap();
    assert_eq!(sub.token, 1.0);
    assert_eq!(sub.phonetic, 1.0);
    assert!(eval.result.score > 0.9 && eval.result.score < 1.0);
}

#[test]
fn test_mixed_bulletin_ordering() {
    let candidates = [
        "Avrupa Kaplanı",
        "Kartalı Anadolu",
        "ANADOLU KARTALı GIDA",
        "Anadolu Kartalı Tekstil",
        "Anadolu Kartali",
    ];
    let config = WatchConfig::default().with_threshold(Threshold::new(0.5).unwrap());
    let results = run_brand_watch(TERM, &candidates, &config).unwrap();

    let exact: Vec<&str> = results
        .iter()
        .filter(|r| r.is_exact())
        .map(|r| r.mark.as_str())
        .collect();
    assert_eq!(exact, ["ANADOLU KARTALı GIDA", "Anadolu Kartalı Tekstil"]);
    assert!(results[..2].iter().all(MatchResult::is_exact));

    let similar: Vec<f64> = results[2..].iter().map(|r| r.score).collect();
    assert!(similar.windows(2).all(|w| w[0] >= w[1]));
    assert!(similar.iter().all(|s| *s >= 0.5));
    assert!(results.iter().all(|r| r.mark != "Avrupa Kaplanı"));
}

#[test]
fn test_dotted_capital_i_does_not_fold_to_dotless() {
    // "KARTALI" folds to "kartali", which is not "kartalı"
    let results = run_brand_watch(
        TERM,
        &["ANADOLU KARTALI"],
        &WatchConfig::default().with_threshold(Threshold::new(0.0).unwrap()),
    )
    .unwrap();
    assert_eq!(results[0].match_type, MatchType::Similar);
}

#[test]
fn test_invalid_weights_fail_before_scoring() {
    let mut config = WatchConfig::default();
    config.weights = WeightConfig {
        phonetic: 0.0,
        string: 0.0,
        token: 0.0,
    };
    assert_eq!(
        run_brand_watch(TERM, &["x"], &config),
        Err(WatchError::Config(ConfigError::AllWeightsZero))
    );
}

#[test]
fn test_empty_term_rejected() {
    assert_eq!(
        run_brand_watch("", &["Anadolu"], &WatchConfig::default()),
        Err(WatchError::EmptySearchTerm)
    );
}

#[test]
fn test_whitespace_term_goes_through_exact_check() {
    let results = run_brand_watch(" ", &["Anadolu Kartali"], &WatchConfig::default()).unwrap();
    assert_eq!(results, vec![MatchResult::exact("Anadolu Kartali")]);
}

#[test]
fn test_misspelled_weights_rejected_from_json() {
    let parsed = serde_json::from_str::<WatchConfig>(
        r#"{"weights": {"phonetc": 1.0, "strng": 0.0, "tokn": 0.0}}"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn test_owned_candidates() {
    let candidates: Vec<String> = vec!["Anadolu Kartalı Spor".into(), "Başka".into()];
    let results = run_brand_watch(TERM, &candidates, &WatchConfig::default()).unwrap();
    assert_eq!(results[0].mark, "Anadolu Kartalı Spor");
}

#[test]
fn test_config_from_json() {
    let config: WatchConfig = serde_json::from_str(
        r#"{"weights": {"phonetic": 0.5, "string": 0.3, "token": 0.2}, "threshold": 0.8}"#,
    )
    .unwrap();
    assert_eq!(config.weights.phonetic, 0.5);
    assert_eq!(config.threshold.value(), 0.8);
    assert_eq!(config.parallel_threshold, 100);

    let bad = serde_json::from_str::<WatchConfig>(r#"{"threshold": 1.5}"#);
    assert!(bad.is_err());
}

#[test]
fn test_result_serialization() {
    let json = serde_json::to_value(MatchResult::exact("Efes")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"mark": "Efes", "score": 1.0, "match_type": "exact"})
    );
}
