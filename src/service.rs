//! The inference service context.
//!
//! [`ClusterService`] is built once from loaded artifacts and never mutated
//! afterwards; share it behind an `Arc` and call it from any number of
//! request handlers.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::artifacts::ModelArtifacts;
use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::kmeans::KMeansModel;
use crate::preprocess::preprocess;
use crate::scoring::{cosine_confidence, top_keywords, top_weighted_terms};
use crate::vectorizer::TfidfVectorizer;

/// Theme reported for a classified ticket whose cluster has no label.
pub const DEFAULT_TICKET_THEME: &str = "General Support";
/// Theme reported in the catalog and detail views for an unlabeled cluster.
pub const UNKNOWN_THEME: &str = "Unknown";
/// Informational threshold echoed in cluster details. Nothing enforces it.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

const BATCH_SUBJECT_PREVIEW_CHARS: usize = 50;

/// A support ticket submitted for classification.
///
/// Only `subject` and `body` influence the result; `language` and
/// `priority` are accepted for client compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub subject: String,
    pub body: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_priority() -> i64 {
    2
}

impl Ticket {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            language: default_language(),
            priority: default_priority(),
        }
    }
}

/// Result of classifying one ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub cluster_id: usize,
    pub cluster_theme: String,
    pub confidence: f64,
    pub similar_keywords: Vec<String>,
    pub sample_size: usize,
    pub processing_time_ms: f64,
}

/// One entry of a batch result, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchItem {
    Failed { subject: String, error: String },
    Classified(ClusterAssignment),
}

impl BatchItem {
    pub fn is_error(&self) -> bool {
        matches!(self, BatchItem::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub total_tickets: usize,
    pub processed_tickets: usize,
    pub total_time_ms: f64,
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster_id: usize,
    pub theme: String,
    pub size: usize,
    pub top_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterCatalog {
    pub total_clusters: usize,
    pub features: usize,
    pub clusters: Vec<ClusterSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub word: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterDetail {
    pub cluster_id: usize,
    pub theme: String,
    pub size: usize,
    pub centroid_keywords: Vec<KeywordScore>,
    pub confidence_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub total_clusters: usize,
    pub uptime_seconds: f64,
}

/// Immutable inference context shared by all requests.
#[derive(Debug)]
pub struct ClusterService {
    vectorizer: TfidfVectorizer,
    model: KMeansModel,
    themes: BTreeMap<usize, String>,
    sizes: Vec<usize>,
    config: ModelConfig,
    started_at: Instant,
}

impl ClusterService {
    pub fn new(artifacts: ModelArtifacts, config: ModelConfig) -> Self {
        let sizes = vec![config.placeholder_cluster_size; artifacts.model.n_clusters()];
        Self {
            vectorizer: artifacts.vectorizer,
            model: artifacts.model,
            themes: artifacts.themes,
            sizes,
            config,
            started_at: Instant::now(),
        }
    }

    /// Loads artifacts from `config.models_dir` and builds the service.
    pub fn load(config: ModelConfig) -> Result<Self, ModelError> {
        let artifacts = ModelArtifacts::load(&config)?;
        tracing::info!(
            models_dir = %config.models_dir.display(),
            clusters = artifacts.model.n_clusters(),
            features = artifacts.vectorizer.n_features(),
            "models loaded"
        );
        Ok(Self::new(artifacts, config))
    }

    pub fn n_clusters(&self) -> usize {
        self.model.n_clusters()
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn theme(&self, cluster: usize) -> Option<&str> {
        self.themes.get(&cluster).map(String::as_str)
    }

    pub fn cluster_size(&self, cluster: usize) -> Option<usize> {
        self.sizes.get(cluster).copied()
    }

    /// preprocess → vectorize → predict → score → keywords.
    pub fn classify(&self, ticket: &Ticket) -> Result<ClusterAssignment, ModelError> {
        let start = Instant::now();

        let len = ticket.subject.chars().count() + ticket.body.chars().count();
        if len > self.config.max_input_chars {
            return Err(ModelError::InputTooLarge {
                len,
                max: self.config.max_input_chars,
            });
        }

        let text = preprocess(&ticket.subject, &ticket.body);
        let vector = self.vectorizer.transform(&text);
        if vector.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::NonFinite);
        }

        let cluster_id = self.model.predict(&vector);
        let confidence = self
            .model
            .centroid(cluster_id)
            .map(|centroid| cosine_confidence(&vector, centroid))
            .ok_or_else(|| ModelError::schema(format!("predicted unknown cluster {cluster_id}")))?;
        if confidence.is_degenerate() {
            tracing::debug!(cluster_id, "degenerate similarity, using fallback confidence");
        }

        let similar_keywords = top_keywords(
            &vector,
            self.vectorizer.feature_names(),
            self.config.keyword_count,
        );

        Ok(ClusterAssignment {
            cluster_id,
            cluster_theme: self
                .theme(cluster_id)
                .unwrap_or(DEFAULT_TICKET_THEME)
                .to_string(),
            confidence: confidence.value(),
            similar_keywords,
            sample_size: self.cluster_size(cluster_id).unwrap_or(0),
            processing_time_ms: elapsed_ms(start),
        })
    }

    /// Classifies each ticket independently; failures become per-item
    /// error entries and never abort the batch.
    pub fn classify_batch(&self, tickets: &[Ticket]) -> BatchOutcome {
        let start = Instant::now();
        let results: Vec<BatchItem> = tickets
            .iter()
            .map(|ticket| match self.classify(ticket) {
                Ok(assignment) => BatchItem::Classified(assignment),
                Err(err) => {
                    tracing::warn!(error = %err, "batch item failed");
                    BatchItem::Failed {
                        subject: subject_preview(&ticket.subject),
                        error: err.to_string(),
                    }
                }
            })
            .collect();
        let processed_tickets = results.iter().filter(|item| !item.is_error()).count();

        BatchOutcome {
            total_tickets: tickets.len(),
            processed_tickets,
            total_time_ms: elapsed_ms(start),
            results,
        }
    }

    /// Theme, size and top centroid terms for every cluster.
    pub fn catalog(&self) -> ClusterCatalog {
        let features = self.vectorizer.feature_names();
        let clusters = (0..self.n_clusters())
            .filter_map(|id| {
                let centroid = self.model.centroid(id)?;
                let top_keywords =
                    top_weighted_terms(centroid, features, self.config.catalog_keyword_count)
                        .into_iter()
                        .map(|(word, _)| word)
                        .collect();
                Some(ClusterSummary {
                    cluster_id: id,
                    theme: self.theme(id).unwrap_or(UNKNOWN_THEME).to_string(),
                    size: self.cluster_size(id).unwrap_or(0),
                    top_keywords,
                })
            })
            .collect();

        ClusterCatalog {
            total_clusters: self.n_clusters(),
            features: self.n_features(),
            clusters,
        }
    }

    /// Detail for one cluster, or `None` when `cluster` is out of range.
    pub fn cluster_detail(&self, cluster: usize) -> Option<ClusterDetail> {
        let centroid = self.model.centroid(cluster)?;
        let centroid_keywords = top_weighted_terms(
            centroid,
            self.vectorizer.feature_names(),
            self.config.detail_keyword_count,
        )
        .into_iter()
        .map(|(word, score)| KeywordScore { word, score })
        .collect();

        Some(ClusterDetail {
            cluster_id: cluster,
            theme: self.theme(cluster).unwrap_or(UNKNOWN_THEME).to_string(),
            size: self.cluster_size(cluster).unwrap_or(0),
            centroid_keywords,
            confidence_threshold: CONFIDENCE_THRESHOLD,
        })
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            total_clusters: self.n_clusters(),
            uptime_seconds: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// First 50 characters of `subject`, with `...` appended when cut.
fn subject_preview(subject: &str) -> String {
    let mut chars = subject.chars();
    let head: String = chars.by_ref().take(BATCH_SUBJECT_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
