use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use ticket_cluster::ModelError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Fixed message for requests that arrive without a loaded model.
pub const MODELS_NOT_LOADED: &str = "Models not loaded";

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Models not loaded")]
    ModelsUnavailable,

    #[error("Classification failed: {0}")]
    Classification(#[from] ModelError),

    #[error("Cluster {0} not found")]
    ClusterNotFound(usize),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::ModelsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::ClusterNotFound(_) | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Classification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::ModelsUnavailable => "MODELS_UNAVAILABLE",
            ServerError::Classification(_) => "CLASSIFICATION_ERROR",
            ServerError::ClusterNotFound(_) => "CLUSTER_NOT_FOUND",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_by_variant() {
        assert_eq!(
            ServerError::ModelsUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ServerError::ClusterNotFound(15).status_code(),
            StatusCode::NOT_FOUND
        );
        let err: ServerError = ModelError::NonFinite.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn classification_error_carries_underlying_message() {
        let err: ServerError = ModelError::InputTooLarge { len: 20, max: 10 }.into();
        assert_eq!(
            err.to_string(),
            "Classification failed: ticket text too large: 20 characters (max 10)"
        );
    }

    #[test]
    fn unavailable_uses_fixed_message() {
        assert_eq!(ServerError::ModelsUnavailable.to_string(), MODELS_NOT_LOADED);
    }
}
