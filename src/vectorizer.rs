//! Fitted TF-IDF vectorizer.
//!
//! The vocabulary and idf weights are produced by an external training run
//! and loaded read-only. Transformation is a pure function of the input text
//! and the fitted parameters.

use fxhash::{FxHashMap, FxHashSet};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Row normalization applied after tf-idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
}

/// On-disk shape of the vectorizer artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Feature names; position is the feature column.
    pub vocabulary: Vec<String>,
    #[serde(default)]
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_true")]
    pub use_idf: bool,
    /// `None` disables normalization.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

impl VectorizerParams {
    /// Unigram, l2-normalized parameters over `vocabulary` with the given idf.
    pub fn new(vocabulary: Vec<String>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            ngram_range: default_ngram_range(),
            stop_words: Vec::new(),
            lowercase: true,
            binary: false,
            sublinear_tf: false,
            use_idf: true,
            norm: default_norm(),
        }
    }
}

/// A validated, immutable TF-IDF vectorizer.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    params: VectorizerParams,
    index: FxHashMap<String, usize>,
    stop_words: FxHashSet<String>,
}

impl TfidfVectorizer {
    pub fn new(params: VectorizerParams) -> Result<Self, ModelError> {
        let features = params.vocabulary.len();
        if features == 0 {
            return Err(ModelError::schema("vectorizer vocabulary is empty"));
        }
        if params.use_idf && params.idf.len() != features {
            return Err(ModelError::schema(format!(
                "idf length {} != vocabulary size {features}",
                params.idf.len()
            )));
        }
        if params.idf.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::schema("idf contains non-finite weights"));
        }
        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::schema(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let mut index = FxHashMap::default();
        index.reserve(features);
        for (column, term) in params.vocabulary.iter().enumerate() {
            if index.insert(term.clone(), column).is_some() {
                return Err(ModelError::schema(format!(
                    "duplicate vocabulary term {term:?}"
                )));
            }
        }
        let stop_words = params.stop_words.iter().cloned().collect();

        Ok(Self {
            params,
            index,
            stop_words,
        })
    }

    /// Number of feature columns (F).
    pub fn n_features(&self) -> usize {
        self.params.vocabulary.len()
    }

    /// Vocabulary terms in column order.
    pub fn feature_names(&self) -> &[String] {
        &self.params.vocabulary
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    /// Maps text to a dense tf-idf vector of length [`Self::n_features`].
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let mut counts = Array1::<f64>::zeros(self.n_features());

        let lowered;
        let text = if self.params.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let tokens: Vec<&str> = word_tokens(text)
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.params.ngram_range;
        let mut gram = String::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                gram.clear();
                for (i, token) in window.iter().enumerate() {
                    if i > 0 {
                        gram.push(' ');
                    }
                    gram.push_str(token);
                }
                if let Some(&column) = self.index.get(gram.as_str()) {
                    counts[column] += 1.0;
                }
            }
        }

        if self.params.binary {
            counts.mapv_inplace(|c| if c > 0.0 { 1.0 } else { 0.0 });
        }
        if self.params.sublinear_tf {
            counts.mapv_inplace(|c| if c > 0.0 { 1.0 + c.ln() } else { 0.0 });
        }
        if self.params.use_idf {
            counts
                .iter_mut()
                .zip(&self.params.idf)
                .for_each(|(c, idf)| *c *= idf);
        }

        match self.params.norm {
            Some(Norm::L2) => {
                let norm = counts.dot(&counts).sqrt();
                if norm > 0.0 {
                    counts.mapv_inplace(|c| c / norm);
                }
            }
            Some(Norm::L1) => {
                let norm: f64 = counts.iter().map(|c| c.abs()).sum();
                if norm > 0.0 {
                    counts.mapv_inplace(|c| c / norm);
                }
            }
            None => {}
        }

        counts
    }
}

/// Maximal runs of word characters (alphanumeric or `_`) of length two or more.
pub(crate) fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().nth(1).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn unit_idf(n: usize) -> Vec<f64> {
        vec![1.0; n]
    }

    #[test]
    fn tokens_skip_single_chars_and_punctuation() {
        let tokens: Vec<&str> = word_tokens("a login-error, i/o db_2 x").collect();
        assert_eq!(tokens, vec!["login", "error", "db_2"]);
    }

    #[test]
    fn transform_counts_in_vocabulary_terms() {
        let mut params = VectorizerParams::new(vocab(&["billing", "refund", "login"]), unit_idf(3));
        params.norm = None;
        let v = TfidfVectorizer::new(params).unwrap();

        let out = v.transform("Refund refund billing unknown");
        assert_eq!(out.to_vec(), vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn transform_is_l2_normalized_by_default() {
        let v = TfidfVectorizer::new(VectorizerParams::new(
            vocab(&["billing", "refund"]),
            unit_idf(2),
        ))
        .unwrap();
        let out = v.transform("billing refund");
        let norm = out.dot(&out).sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert!((out[0] - out[1]).abs() < 1e-12);
    }

    #[test]
    fn idf_weights_scale_terms() {
        let mut params = VectorizerParams::new(vocab(&["billing", "refund"]), vec![1.0, 3.0]);
        params.norm = None;
        let v = TfidfVectorizer::new(params).unwrap();
        assert_eq!(v.transform("billing refund").to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let v = TfidfVectorizer::new(VectorizerParams::new(vocab(&["billing"]), unit_idf(1)))
            .unwrap();
        assert!(v.transform("").iter().all(|&w| w == 0.0));
    }

    #[test]
    fn stop_words_are_removed_before_bigrams() {
        let mut params =
            VectorizerParams::new(vocab(&["password reset", "the password"]), unit_idf(2));
        params.ngram_range = (1, 2);
        params.stop_words = vocab(&["the"]);
        params.norm = None;
        let v = TfidfVectorizer::new(params).unwrap();

        let out = v.transform("the password reset");
        assert_eq!(out.to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn sublinear_and_binary_tf() {
        let mut params = VectorizerParams::new(vocab(&["error"]), unit_idf(1));
        params.norm = None;
        params.sublinear_tf = true;
        let v = TfidfVectorizer::new(params.clone()).unwrap();
        let out = v.transform("error error error");
        assert!((out[0] - (1.0 + 3.0f64.ln())).abs() < 1e-12);

        params.sublinear_tf = false;
        params.binary = true;
        let v = TfidfVectorizer::new(params).unwrap();
        assert_eq!(v.transform("error error").to_vec(), vec![1.0]);
    }

    #[test]
    fn rejects_inconsistent_params() {
        assert!(TfidfVectorizer::new(VectorizerParams::new(vec![], vec![])).is_err());
        assert!(
            TfidfVectorizer::new(VectorizerParams::new(vocab(&["a1", "b1"]), unit_idf(1)))
                .is_err()
        );
        assert!(
            TfidfVectorizer::new(VectorizerParams::new(vocab(&["a1", "a1"]), unit_idf(2)))
                .is_err()
        );
        let mut params = VectorizerParams::new(vocab(&["a1"]), unit_idf(1));
        params.ngram_range = (2, 1);
        assert!(TfidfVectorizer::new(params).is_err());
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: VectorizerParams =
            serde_json::from_str(r#"{"vocabulary": ["billing"], "idf": [1.5]}"#).unwrap();
        assert_eq!(params.ngram_range, (1, 1));
        assert!(params.lowercase);
        assert!(params.use_idf);
        assert_eq!(params.norm, Some(Norm::L2));

        let params: VectorizerParams = serde_json::from_str(
            r#"{"vocabulary": ["billing"], "use_idf": false, "norm": null, "ngram_range": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(params.norm, None);
        assert_eq!(params.ngram_range, (1, 2));
    }
}
