use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Every way a request can fail, mapped onto a single HTTP status each.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not configured.")]
    Configuration(String),

    #[error("Only PDF files are allowed (got {0}).")]
    UnsupportedMediaType(String),

    #[error("PDF is empty or non-readable.")]
    EmptyDocument,

    #[error("PDF processing error: {0}")]
    Extraction(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request too large: {0}")]
    PayloadTooLarge(String),

    #[error("Could not connect to AI service: {0}")]
    UpstreamUnavailable(String),

    #[error("Gemini API Error: {0}")]
    Upstream(String),

    #[error("Invalid response structure from Gemini API: {0}")]
    UpstreamProtocol(String),

    #[error("AI did not return valid JSON: {0}")]
    MalformedAiResponse(String),

    #[error("Unexpected error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UnsupportedMediaType(_)
            | ServiceError::EmptyDocument
            | ServiceError::Extraction(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServiceError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Configuration(_)
            | ServiceError::Upstream(_)
            | ServiceError::UpstreamProtocol(_)
            | ServiceError::MalformedAiResponse(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body-size rejections keep their 413; every other extractor failure is a 422.
    fn from_rejection(status: StatusCode, body_text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ServiceError::PayloadTooLarge(body_text)
        } else {
            ServiceError::InvalidRequest(body_text)
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ServiceError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ServiceError {
    fn from(err: MultipartError) -> Self {
        Self::from_rejection(err.status(), err.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = %status.as_u16(), error = %detail, "Request failed");
        } else {
            warn!(status = %status.as_u16(), error = %detail, "Rejected request");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
