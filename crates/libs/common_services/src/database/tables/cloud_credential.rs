use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::fmt::Display;
use utoipa::ToSchema;

/// Cloud storage backend a media item lives in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CloudProvider {
    GoogleDrive,
}

impl Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::GoogleDrive => "google_drive",
        };
        f.write_str(s)
    }
}

/// One stored OAuth credential set. A user has at most one row per provider;
/// writes always replace the whole row.
#[derive(Debug, Clone, FromRow)]
pub struct CloudCredential {
    pub user_id: i64,
    pub provider: CloudProvider,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}
