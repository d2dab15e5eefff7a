//! Confidence scoring and keyword selection over feature vectors.

use ndarray::{Array1, ArrayView1};

/// Confidence reported when the similarity is undefined.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Outcome of comparing a feature vector against its assigned centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confidence {
    /// Cosine similarity clamped to `[0, 1]`.
    Score(f64),
    /// Either vector has zero norm, or the arithmetic produced a non-finite value.
    Degenerate,
}

impl Confidence {
    /// The score, or [`FALLBACK_CONFIDENCE`] for degenerate input.
    pub fn value(self) -> f64 {
        self.value_or(FALLBACK_CONFIDENCE)
    }

    pub fn value_or(self, fallback: f64) -> f64 {
        match self {
            Confidence::Score(s) => s,
            Confidence::Degenerate => fallback,
        }
    }

    pub fn is_degenerate(self) -> bool {
        matches!(self, Confidence::Degenerate)
    }
}

/// Cosine similarity between `v` and `centroid`, clamped to `[0, 1]`.
pub fn cosine_confidence(v: &Array1<f64>, centroid: ArrayView1<'_, f64>) -> Confidence {
    let v_norm = v.dot(v).sqrt();
    let c_norm = centroid.dot(&centroid).sqrt();
    if v_norm == 0.0 || c_norm == 0.0 {
        return Confidence::Degenerate;
    }
    let similarity = v.dot(&centroid) / (v_norm * c_norm);
    if !similarity.is_finite() {
        return Confidence::Degenerate;
    }
    Confidence::Score(similarity.clamp(0.0, 1.0))
}

/// Column indices of the `n` largest entries passing `keep`, in descending
/// order of weight. Ties keep the lower column first.
fn top_columns<'a>(
    weights: impl IntoIterator<Item = &'a f64>,
    n: usize,
    keep: impl Fn(f64) -> bool,
) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = weights
        .into_iter()
        .copied()
        .enumerate()
        .filter(|&(_, w)| keep(w))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Terms for the `n` highest strictly positive weights of `vector`.
///
/// A zero vector yields no keywords.
pub fn top_keywords(vector: &Array1<f64>, features: &[String], n: usize) -> Vec<String> {
    top_columns(vector, n, |w| w > 0.0)
        .into_iter()
        .filter_map(|(column, _)| features.get(column).cloned())
        .collect()
}

/// `(term, weight)` pairs for the `n` largest entries of `weights`,
/// regardless of sign.
pub fn top_weighted_terms(
    weights: ArrayView1<'_, f64>,
    features: &[String],
    n: usize,
) -> Vec<(String, f64)> {
    top_columns(weights, n, |w| !w.is_nan())
        .into_iter()
        .filter_map(|(column, w)| features.get(column).map(|term| (term.clone(), w)))
        .collect()
}
