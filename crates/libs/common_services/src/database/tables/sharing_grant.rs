use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A directed permission: one media item shared with one other user.
/// At most one grant exists per (media item, target user) pair.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SharingGrant {
    pub id: i64,
    pub media_item_id: String,
    pub shared_with_user_id: i64,
    pub can_download: bool,
    pub shared_at: DateTime<Utc>,
}
