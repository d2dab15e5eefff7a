use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

/// Catalog of every cluster with its theme, size and top centroid terms.
pub async fn list_clusters(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let service = state.service()?;
    Ok(Json(service.catalog()))
}

/// Detail of one cluster: raw centroid weights of its top terms.
pub async fn get_cluster(
    State(state): State<Arc<ServerState>>,
    Path(cluster_id): Path<usize>,
) -> ServerResult<impl IntoResponse> {
    let service = state.service()?;
    service
        .cluster_detail(cluster_id)
        .map(Json)
        .ok_or(ServerError::ClusterNotFound(cluster_id))
}
