use crate::database::MediaItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Must reference a media item that is a member of this album.
    pub cover_media_id: Option<String>,
}

/// Full album view. `media_items` is filtered to what the requesting user
/// may see; owners see every member.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetailsResponse {
    pub id: String,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cover_media_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub media_items: Vec<MediaItem>,
}
