use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::document::DocumentError;

pub const REUPLOAD_HINT: &str = "Please upload a PDF or DOCX resume with selectable text.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// LLM failures never reach this type: every LLM-backed endpoint answers with a
/// model-or-fallback envelope instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFileFormat(String),

    #[error("The uploaded file is empty")]
    EmptyFile,

    #[error("No text could be extracted from the document")]
    EmptyExtractedText,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn session_not_found(id: Uuid) -> Self {
        AppError::NotFound(format!("Session {id} not found"))
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::UnsupportedFormat(format) => AppError::UnsupportedFileFormat(format),
            DocumentError::EmptyFile => AppError::EmptyFile,
            DocumentError::Malformed(detail) => AppError::Internal(anyhow::anyhow!(detail)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFileFormat(format) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNSUPPORTED_FILE_FORMAT",
                format!("Unsupported file format: {format}. {REUPLOAD_HINT}"),
            ),
            AppError::EmptyFile => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_FILE",
                format!("The uploaded file is empty. {REUPLOAD_HINT}"),
            ),
            AppError::EmptyExtractedText => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_EXTRACTED_TEXT",
                format!(
                    "No text could be extracted (scanned or image-only documents are not supported). {REUPLOAD_HINT}"
                ),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::UnsupportedFileFormat(".txt".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::EmptyFile, StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::EmptyExtractedText, StatusCode::UNPROCESSABLE_ENTITY),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_document_error_mapping() {
        let err: AppError = DocumentError::UnsupportedFormat(".png".into()).into();
        assert!(matches!(err, AppError::UnsupportedFileFormat(f) if f == ".png"));
        let err: AppError = DocumentError::EmptyFile.into();
        assert!(matches!(err, AppError::EmptyFile));
    }
}
