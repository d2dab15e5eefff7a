use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while loading model artifacts or classifying tickets.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An artifact file could not be read.
    #[error("failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An artifact file is not valid JSON for its schema.
    #[error("failed to parse artifact {path}: {source}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Artifacts parsed but are inconsistent with each other or with themselves.
    #[error("artifact schema mismatch: {0}")]
    SchemaMismatch(String),
    /// Ticket text exceeds the configured input limit.
    #[error("ticket text too large: {len} characters (max {max})")]
    InputTooLarge { len: usize, max: usize },
    /// Vectorization produced NaN or infinite weights.
    #[error("feature vector contains non-finite values")]
    NonFinite,
}

impl ModelError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        ModelError::SchemaMismatch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_read_mentions_path() {
        let err = ModelError::ArtifactRead {
            path: PathBuf::from("models/vectorizer.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("models/vectorizer.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn input_too_large_reports_limits() {
        let err = ModelError::InputTooLarge { len: 12, max: 10 };
        assert_eq!(err.to_string(), "ticket text too large: 12 characters (max 10)");
    }

    #[test]
    fn schema_helper_wraps_message() {
        let err = ModelError::schema("idf length 3 != vocabulary size 4");
        assert!(matches!(err, ModelError::SchemaMismatch(_)));
        assert!(err.to_string().contains("idf length 3"));
    }
}
