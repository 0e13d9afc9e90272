use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A remark left on a media item by a user who can see it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub media_item_id: String,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
