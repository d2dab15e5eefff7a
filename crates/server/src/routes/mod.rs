//! API route handlers
//!
//! - `health`: Health check
//! - `cluster`: Ticket classification (single and batch)
//! - `clusters`: Cluster catalog and detail

pub mod cluster;
pub mod clusters;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns a welcome payload listing the available endpoints.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Ticket Cluster API",
        "message": "Support ticket clustering service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "cluster": "POST /cluster",
            "batch": "POST /cluster/batch",
            "clusters": "GET /clusters",
            "cluster_detail": "GET /clusters/{cluster_id}"
        }
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
