use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use ticket_cluster::Ticket;

/// Classify a single ticket.
///
/// # Example
/// ```json
/// // Request
/// { "subject": "Refund request", "body": "I was charged twice", "priority": 1 }
///
/// // Response
/// {
///   "cluster_id": 0,
///   "cluster_theme": "Billing",
///   "confidence": 0.83,
///   "similar_keywords": ["charged", "refund"],
///   "sample_size": 1000,
///   "processing_time_ms": 0.12
/// }
/// ```
pub async fn classify_ticket(
    State(state): State<Arc<ServerState>>,
    Json(ticket): Json<Ticket>,
) -> ServerResult<impl IntoResponse> {
    let service = state.service()?;
    let assignment = service.classify(&ticket)?;

    tracing::debug!(
        cluster_id = assignment.cluster_id,
        confidence = assignment.confidence,
        "ticket classified"
    );

    Ok(Json(assignment))
}

/// Classify a list of tickets. Items fail independently; the response
/// always covers every input ticket, in order.
pub async fn classify_batch(
    State(state): State<Arc<ServerState>>,
    Json(tickets): Json<Vec<Ticket>>,
) -> ServerResult<impl IntoResponse> {
    let service = state.service()?;
    let outcome = service.classify_batch(&tickets);

    tracing::info!(
        total = outcome.total_tickets,
        processed = outcome.processed_tickets,
        total_time_ms = outcome.total_time_ms,
        "batch classified"
    );

    Ok(Json(outcome))
}
