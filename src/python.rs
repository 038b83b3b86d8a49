//! Python bindings (`markwatch._core`)

use pyo3::create_exception;
use pyo3::prelude::*;

use crate::config::{Threshold, WatchConfig, WeightConfig};
use crate::error::WatchError;
use crate::watch::{self, BrandWatch};

create_exception!(markwatch, MarkWatchError, pyo3::exceptions::PyException);
create_exception!(markwatch, ValidationError, MarkWatchError);

impl From<WatchError> for PyErr {
    fn from(err: WatchError) -> Self {
        ValidationError::new_err(err.to_string())
    }
}

/// One screened candidate.
#[pyclass(name = "MatchResult", frozen)]
#[derive(Clone, Debug)]
pub struct PyMatchResult {
    /// Candidate mark as supplied
    #[pyo3(get)]
    pub mark: String,

    /// 1.0 for exact matches, weighted aggregate otherwise
    #[pyo3(get)]
    pub score: f64,

    /// "exact" or "similar"
    #[pyo3(get)]
    pub match_type: String,
}

#[pymethods]
impl PyMatchResult {
    fn __repr__(&self) -> String {
        format!(
            "MatchResult(mark='{}', score={:.4}, match_type='{}')",
            self.mark, self.score, self.match_type
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.mark == other.mark
            && self.match_type == other.match_type
            && (self.score - other.score).abs() < 1e-9
    }
}

impl From<watch::MatchResult> for PyMatchResult {
    fn from(r: watch::MatchResult) -> Self {
        Self {
            mark: r.mark,
            score: r.score,
            match_type: r.match_type.to_string(),
        }
    }
}

/// Parse a `{"phonetic": .., "string": .., "token": ..}` dict.
///
/// Missing keys keep their defaults; unknown keys are rejected.
fn parse_weights(weights: Option<std::collections::HashMap<String, f64>>) -> PyResult<WeightConfig> {
    let mut config = WeightConfig::default();
    if let Some(weights) = weights {
        for (key, value) in weights {
            match key.as_str() {
                "phonetic" => config.phonetic = value,
                "string" => config.string = value,
                "token" => config.token = value,
                other => {
                    return Err(ValidationError::new_err(format!(
                        "Unknown weight '{}'. Valid: phonetic, string, token",
                        other
                    )))
                }
            }
        }
    }
    config
        .validate()
        .map_err(|e| ValidationError::new_err(e.to_string()))?;
    Ok(config)
}

/// Screen candidate marks against a search term.
///
/// # Arguments
/// * `search_term` - Tracked portfolio phrase
/// * `candidate_marks` - Bulletin entries
/// * `weights` - Optional dict with `phonetic`, `string`, `token` weights
/// * `threshold` - Minimum score for similar matches (default 0.70)
///
/// # Example
/// ```python
/// >>> run_brand_watch("Anadolu Kartalı", ["Anadolu Kartalı İçecek Sanayi"])
/// [MatchResult(mark='Anadolu Kartalı İçecek Sanayi', score=1.0000, match_type='exact')]
/// ```
#[pyfunction]
#[pyo3(signature = (search_term, candidate_marks, weights=None, threshold=0.70))]
fn run_brand_watch(
    py: Python<'_>,
    search_term: Option<String>,
    candidate_marks: Option<Vec<String>>,
    weights: Option<std::collections::HashMap<String, f64>>,
    threshold: f64,
) -> PyResult<Vec<PyMatchResult>> {
    let search_term =
        search_term.ok_or_else(|| ValidationError::new_err("search_term must not be None"))?;
    let candidate_marks =
        candidate_marks.ok_or_else(|| ValidationError::new_err("candidate_marks must not be None"))?;
    let threshold = Threshold::new(threshold).map_err(|e| ValidationError::new_err(e.to_string()))?;
    let config = WatchConfig::default()
        .with_weights(parse_weights(weights)?)
        .with_threshold(threshold);

    let watch = BrandWatch::with_config(config)?;
    let results = py.allow_threads(|| watch.run(&search_term, &candidate_marks))?;
    Ok(results.into_iter().map(PyMatchResult::from).collect())
}

#[pymodule]
fn _core(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("MarkWatchError", py.get_type::<MarkWatchError>())?;
    m.add("ValidationError", py.get_type::<ValidationError>())?;

    m.add_class::<PyMatchResult>()?;
    m.add_function(wrap_pyfunction!(run_brand_watch, m)?)?;
    Ok(())
}
