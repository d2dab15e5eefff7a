//! Support-ticket clustering inference.
//!
//! Wraps a TF-IDF vectorizer and a k-means model fitted elsewhere so callers
//! can classify a ticket's subject and body into a cluster, with a
//! confidence score and representative keywords.
//!
//! ## Pipeline
//!
//! 1. [`preprocess`]: lower-case, join subject and body, collapse whitespace
//! 2. [`TfidfVectorizer::transform`]: dense tf-idf vector over the fitted vocabulary
//! 3. [`KMeansModel::predict`]: nearest centroid
//! 4. [`cosine_confidence`]: similarity to that centroid, `0.5` when undefined
//! 5. [`top_keywords`]: highest-weighted terms of the input
//!
//! Artifacts are loaded once by [`ClusterService::load`]; after that every
//! operation is a read-only pass over immutable state.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod kmeans;
pub mod preprocess;
pub mod scoring;
pub mod service;
pub mod vectorizer;

pub use crate::artifacts::ModelArtifacts;
pub use crate::config::ModelConfig;
pub use crate::error::ModelError;
pub use crate::kmeans::{KMeansModel, KMeansParams};
pub use crate::preprocess::{collapse_whitespace, preprocess};
pub use crate::scoring::{
    Confidence, FALLBACK_CONFIDENCE, cosine_confidence, top_keywords, top_weighted_terms,
};
pub use crate::service::{
    BatchItem, BatchOutcome, CONFIDENCE_THRESHOLD, ClusterAssignment, ClusterCatalog,
    ClusterDetail, ClusterService, ClusterSummary, DEFAULT_TICKET_THEME, HealthReport,
    KeywordScore, Ticket, UNKNOWN_THEME,
};
pub use crate::vectorizer::{Norm, TfidfVectorizer, VectorizerParams};
