use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SharingError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Only the owner can manage sharing.")]
    NotOwner,

    #[error("Already shared with this user.")]
    DuplicateGrant,
}

fn log_error(error: &SharingError) {
    match error {
        SharingError::Database(e) => warn!("Sharing -> database query failed: {e}"),
        SharingError::Internal(e) => warn!("Sharing -> internal error: {e:?}"),
        _ => {}
    }
}

impl IntoResponse for SharingError {
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
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
            Self::NotOwner => (StatusCode::FORBIDDEN, self.to_string()),
            Self::DuplicateGrant => (StatusCode::CONFLICT, self.to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for SharingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}
