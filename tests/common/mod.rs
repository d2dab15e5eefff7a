//! Shared fixture: a three-cluster model written to a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use ticket_cluster::ModelConfig;

pub const VOCABULARY: [&str; 8] = [
    "account", "billing", "charge", "crash", "error", "invoice", "password", "refund",
];

pub fn vectorizer_json() -> serde_json::Value {
    json!({
        "vocabulary": VOCABULARY,
        "idf": [1.2, 1.5, 1.7, 1.6, 1.3, 1.8, 1.4, 1.9],
        "stop_words": ["the", "my", "is"],
        "sublinear_tf": true
    })
}

pub fn model_json() -> serde_json::Value {
    json!({
        "n_clusters": 3,
        "cluster_centers": [
            [0.05, 0.45, 0.40, 0.00, 0.02, 0.50, 0.00, 0.55],
            [0.02, 0.00, 0.00, 0.60, 0.65, 0.00, 0.05, 0.00],
            [0.55, 0.02, 0.00, 0.00, 0.10, 0.00, 0.70, 0.00]
        ]
    })
}

pub fn themes_json() -> serde_json::Value {
    json!({"0": "Billing", "1": "Technical", "2": "General"})
}

pub fn write_json(path: &Path, value: &serde_json::Value) {
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

/// Writes the default fixture and returns the directory with a config pointing at it.
pub fn fixture_dir() -> (TempDir, ModelConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = ModelConfig::default().with_models_dir(dir.path());
    write_json(&cfg.vectorizer_path(), &vectorizer_json());
    write_json(&cfg.model_path(), &model_json());
    write_json(&cfg.themes_path(), &themes_json());
    (dir, cfg)
}
