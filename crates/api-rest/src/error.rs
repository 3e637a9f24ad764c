//! Mapping of store outcomes onto HTTP responses.

use api_shared::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use registry_core::{ErrorKind, PatientError};

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be decoded (malformed JSON, non-numeric id).
    BadRequest(String),
    Patient(PatientError),
}

impl From<PatientError> for ApiError {
    fn from(e: PatientError) -> Self {
        ApiError::Patient(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Patient(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message) => {
                tracing::warn!("rejected request: {}", message);
                message
            }
            ApiError::Patient(e) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                // Storage paths and parser output stay in the log.
                tracing::error!("patient storage error: {:?}", e);
                "Internal error".to_string()
            }
            ApiError::Patient(e) => {
                tracing::warn!("rejected request: {}", e);
                e.to_string()
            }
        };

        (status, Json(ErrorRes { error: message })).into_response()
    }
}
