use crate::cloud::{ProviderError, TokenError};
use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CloudApiError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Unknown cloud provider.")]
    UnknownProvider,

    #[error("Cloud provider is not configured on this server.")]
    NotConfigured,

    #[error("Could not connect the account: {0}")]
    ExchangeFailed(String),
}

fn log_error(error: &CloudApiError) {
    match error {
        CloudApiError::Database(e) => warn!("Cloud -> database query failed: {e}"),
        CloudApiError::Internal(e) => warn!("Cloud -> internal error: {e:?}"),
        CloudApiError::ExchangeFailed(message) => warn!("Cloud -> code exchange failed: {message}"),
        _ => {}
    }
}

impl IntoResponse for CloudApiError {
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
            Self::UnknownProvider => (StatusCode::NOT_FOUND, self.to_string()),
            Self::NotConfigured => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            Self::ExchangeFailed(message) => (
                StatusCode::BAD_GATEWAY,
                format!("Could not connect the account: {message}"),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for CloudApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<TokenError> for CloudApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Db(db) => db.into(),
            TokenError::UnknownProvider(_) => Self::UnknownProvider,
            TokenError::Provider(ProviderError::Misconfigured(_)) => Self::NotConfigured,
            TokenError::Provider(provider_err) => Self::ExchangeFailed(provider_err.to_string()),
        }
    }
}
