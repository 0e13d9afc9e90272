use crate::database::CloudProvider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::fmt::Display;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Photo => "photo",
            Self::Video => "video",
        };
        f.write_str(s)
    }
}

/// One uploaded photo or video. The row exists only once the bytes are
/// confirmed stored at the cloud provider.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub owner_id: i64,
    pub cloud_provider: CloudProvider,
    pub cloud_file_id: String,
    pub filename: String,
    pub kind: MediaKind,
    pub size_bytes: i64,
    pub thumbnail_path: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub captured_at: Option<DateTime<Utc>>,
    pub album_id: Option<String>,
    pub caption: Option<String>,
}

/// Fields needed to persist a freshly uploaded media item.
#[derive(Debug, Clone)]
pub struct CreateMediaItem {
    pub owner_id: i64,
    pub cloud_provider: CloudProvider,
    pub cloud_file_id: String,
    pub filename: String,
    pub kind: MediaKind,
    pub size_bytes: i64,
    pub thumbnail_path: Option<String>,
    pub captured_at: Option<DateTime<Utc>>,
    pub album_id: Option<String>,
    pub caption: Option<String>,
}
