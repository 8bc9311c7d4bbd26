//! Error type of the HTTP layer.

use super::response::ErrorBody;
use crate::nsga2::ConfigError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// Failures surfaced to HTTP clients as `{"status":"error","message":...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request body or field.
    #[error("{0}")]
    InvalidInput(String),

    /// The run produced no acceptable front.
    #[error("Optimization failed to converge")]
    NoConvergence,

    /// The engine rejected its configuration.
    #[error("invalid solver configuration: {0}")]
    Engine(#[from] ConfigError),

    /// Any other fault, e.g. a panic inside the blocking run.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::NoConvergence => StatusCode::BAD_REQUEST,
            ApiError::Engine(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!("optimize request failed: {message}");
        } else {
            warn!("optimize request rejected: {message}");
        }
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NoConvergence.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ConfigError::NoGenerations).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::NoConvergence.to_string(),
            "Optimization failed to converge"
        );
        assert_eq!(
            ApiError::from(ConfigError::NoGenerations).to_string(),
            "invalid solver configuration: generation_count must be at least 1"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NoConvergence.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
