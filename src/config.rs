use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the fitted artifacts live and how results are shaped.
///
/// Every field has a default so a partial `models` section (or none at all)
/// in the server configuration is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory holding the three artifacts, relative to the working directory.
    pub models_dir: PathBuf,
    pub vectorizer_file: String,
    pub model_file: String,
    pub themes_file: String,
    /// Keywords returned per classified ticket.
    pub keyword_count: usize,
    /// Keywords shown per cluster in the catalog.
    pub catalog_keyword_count: usize,
    /// `(word, score)` pairs shown in a cluster detail.
    pub detail_keyword_count: usize,
    /// Size reported for every cluster. Training does not export real
    /// populations, so this is a stand-in.
    pub placeholder_cluster_size: usize,
    /// Upper bound on subject + body characters accepted per ticket.
    pub max_input_chars: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            vectorizer_file: "vectorizer.json".to_string(),
            model_file: "kmeans_model.json".to_string(),
            themes_file: "cluster_themes.json".to_string(),
            keyword_count: 5,
            catalog_keyword_count: 5,
            detail_keyword_count: 10,
            placeholder_cluster_size: 1000,
            max_input_chars: 100_000,
        }
    }
}

impl ModelConfig {
    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(&self.vectorizer_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(&self.model_file)
    }

    pub fn themes_path(&self) -> PathBuf {
        self.models_dir.join(&self.themes_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_live_under_models() {
        let cfg = ModelConfig::default();
        assert_eq!(cfg.vectorizer_path(), PathBuf::from("models/vectorizer.json"));
        assert_eq!(cfg.model_path(), PathBuf::from("models/kmeans_model.json"));
        assert_eq!(cfg.themes_path(), PathBuf::from("models/cluster_themes.json"));
        assert_eq!(cfg.keyword_count, 5);
        assert_eq!(cfg.detail_keyword_count, 10);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let cfg: ModelConfig =
            serde_json::from_str(r#"{"models_dir": "/srv/models", "keyword_count": 3}"#).unwrap();
        assert_eq!(cfg.models_dir, PathBuf::from("/srv/models"));
        assert_eq!(cfg.keyword_count, 3);
        assert_eq!(cfg.model_file, "kmeans_model.json");
        assert_eq!(cfg.placeholder_cluster_size, 1000);
    }
}
