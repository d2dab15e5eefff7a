use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

/// Health check endpoint
///
/// Reports `healthy` with the cluster count and uptime when the models are
/// loaded; otherwise answers 503.
pub async fn health_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let service = state.service()?;
    Ok(Json(service.health()))
}
