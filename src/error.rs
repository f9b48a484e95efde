use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::speech::SpeechError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error("Origin not allowed: {0}")]
    OriginNotAllowed(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error body returned to callers
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_kind: String,
    pub message: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Speech(err) => match err {
                SpeechError::MalformedRequest(_)
                | SpeechError::InvalidContent(_)
                | SpeechError::UnsupportedVoice { .. }
                | SpeechError::UnsupportedFormat { .. }
                | SpeechError::UnsafeMarkup(_) => StatusCode::BAD_REQUEST,
                SpeechError::ContentTooLong { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                SpeechError::EngineRejectedInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SpeechError::EngineUnavailable(_) => StatusCode::BAD_GATEWAY,
                SpeechError::EngineQuotaExceeded(_) => StatusCode::SERVICE_UNAVAILABLE,
                SpeechError::StorageWriteFailed(_) | SpeechError::StorageUrlFailed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::OriginNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Speech(err) => err.kind(),
            Self::OriginNotAllowed(_) => "OriginNotAllowed",
            Self::Internal(_) => "Internal",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error_kind: self.error_kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_kind = self.error_kind(),
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                error_kind = self.error_kind(),
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
