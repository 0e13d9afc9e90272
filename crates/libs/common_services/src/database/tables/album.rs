use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A named grouping of media items.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cover_media_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumWithCount {
    pub id: String,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cover_media_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub media_count: i64,
    pub last_uploaded_at: Option<DateTime<Utc>>,
}
