use crate::cloud::ProviderError;
use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Media item not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cloud storage is not connected.")]
    NotConnected,

    #[error("File type not allowed.")]
    UnsupportedMediaType,

    #[error("File exceeds the maximum allowed size.")]
    PayloadTooLarge,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Cloud provider error: {0}")]
    Provider(String),
}

fn log_error(error: &MediaError) {
    match error {
        MediaError::Database(e) => warn!("Media -> database query failed: {e}"),
        MediaError::Internal(e) => warn!("Media -> internal error: {e:?}"),
        MediaError::Provider(message) => warn!("Media -> cloud provider error: {message}"),
        _ => {}
    }
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                format!("Media item not found: {message}"),
            ),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, format!("Forbidden: {message}")),
            Self::NotConnected => (StatusCode::CONFLICT, self.to_string()),
            Self::UnsupportedMediaType => (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string()),
            Self::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
            Self::Provider(message) => (
                StatusCode::BAD_GATEWAY,
                format!("Cloud provider error: {message}"),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for MediaError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<ProviderError> for MediaError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}
