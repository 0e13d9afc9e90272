use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_can_download() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareMediaRequest {
    /// The user to share with.
    pub user_id: i64,
    #[serde(default = "default_can_download")]
    pub can_download: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareAlbumRequest {
    pub user_ids: Vec<i64>,
    #[serde(default = "default_can_download")]
    pub can_download: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareAlbumResponse {
    /// Number of new grants created; existing grants are left untouched.
    pub granted: u64,
}
