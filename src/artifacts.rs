//! Loading of the externally fitted artifacts.
//!
//! Loading is all-or-nothing: either every artifact parses and the three
//! agree on dimensions, or an error is returned and nothing is kept.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::kmeans::{KMeansModel, KMeansParams};
use crate::vectorizer::{TfidfVectorizer, VectorizerParams};

/// The fitted vectorizer, clustering model and theme labels.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub vectorizer: TfidfVectorizer,
    pub model: KMeansModel,
    pub themes: BTreeMap<usize, String>,
}

impl ModelArtifacts {
    /// Assembles artifacts, checking that the vocabulary matches the
    /// centroid dimension. Themes for clusters outside `[0, K)` are dropped.
    pub fn new(
        vectorizer: TfidfVectorizer,
        model: KMeansModel,
        themes: BTreeMap<usize, String>,
    ) -> Result<Self, ModelError> {
        if vectorizer.n_features() != model.n_features() {
            return Err(ModelError::schema(format!(
                "vocabulary size {} != centroid dimension {}",
                vectorizer.n_features(),
                model.n_features()
            )));
        }

        let n_clusters = model.n_clusters();
        let (themes, unknown): (BTreeMap<_, _>, BTreeMap<_, _>) =
            themes.into_iter().partition(|(id, _)| *id < n_clusters);
        for id in unknown.keys() {
            tracing::warn!(cluster_id = id, n_clusters, "ignoring theme for unknown cluster");
        }

        Ok(Self {
            vectorizer,
            model,
            themes,
        })
    }

    /// Reads all artifacts from the paths in `cfg`.
    pub fn load(cfg: &ModelConfig) -> Result<Self, ModelError> {
        let vectorizer_params: VectorizerParams = read_json(&cfg.vectorizer_path())?;
        let model_params: KMeansParams = read_json(&cfg.model_path())?;
        let raw_themes: BTreeMap<String, String> = read_json(&cfg.themes_path())?;

        let vectorizer = TfidfVectorizer::new(vectorizer_params)?;
        let model = KMeansModel::from_params(model_params)?;
        let themes = parse_theme_keys(raw_themes)?;

        Self::new(vectorizer, model, themes)
    }
}

/// Theme documents key clusters by their stringified index.
fn parse_theme_keys(raw: BTreeMap<String, String>) -> Result<BTreeMap<usize, String>, ModelError> {
    raw.into_iter()
        .map(|(key, theme)| {
            key.trim()
                .parse::<usize>()
                .map(|id| (id, theme))
                .map_err(|_| ModelError::schema(format!("theme key {key:?} is not a cluster index")))
        })
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let bytes = fs::read(path).map_err(|source| ModelError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ModelError::ArtifactParse {
        path: path.to_path_buf(),
        source,
    })
}
