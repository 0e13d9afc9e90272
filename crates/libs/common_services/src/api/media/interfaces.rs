use crate::database::MediaItem;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GalleryParams {
    /// 1-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page, capped at 100. Defaults to 20.
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPage {
    pub media: Vec<MediaItem>,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrlResponse {
    pub download_url: String,
    /// Seconds the URL is expected to stay valid.
    pub expires_in: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAlbumRequest {
    /// Target album, or `null` to remove the item from its album.
    pub album_id: Option<String>,
}
