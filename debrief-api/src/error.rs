//! Error types for debrief-api
//!
//! Maps pipeline failures onto HTTP responses. Caller mistakes become 400s,
//! failures of the classifier or the backend become 502s.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type: a pipeline failure on its way to the client
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] debrief_common::Error);

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        use debrief_common::Error;

        match &self.0 {
            Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            Error::MissingIdentity => (StatusCode::BAD_REQUEST, "MISSING_IDENTITY"),
            Error::MissingField(_) => (StatusCode::BAD_REQUEST, "INCOMPLETE_RECORD"),
            Error::Enrichment(_) | Error::ClusterCountMismatch { .. } => {
                (StatusCode::BAD_GATEWAY, "ENRICHMENT_FAILED")
            }
            Error::Persistence(_) => (StatusCode::BAD_GATEWAY, "PERSISTENCE_FAILED"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.parts();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
