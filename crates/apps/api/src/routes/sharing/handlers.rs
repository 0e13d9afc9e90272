use crate::api_state::ApiContext;
use crate::routes::auth::middleware::ApiUser;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::sharing::error::SharingError;
use common_services::api::sharing::interfaces::{
    ShareAlbumRequest, ShareAlbumResponse, ShareMediaRequest,
};
use common_services::api::sharing::service::{
    share_album, share_media, shared_with, unshare_media,
};
use common_services::database::SharingGrant;

/// Share a media item with another user. Owner only.
///
/// Sharing the same item with the same user twice is rejected with a
/// conflict; the existing grant is left untouched.
#[utoipa::path(
    post,
    path = "/media/{media_id}/share",
    tag = "Sharing",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    request_body = ShareMediaRequest,
    responses(
        (status = 201, description = "Grant created.", body = SharingGrant),
        (status = 403, description = "Only the owner can manage sharing."),
        (status = 404, description = "No such media item."),
        (status = 409, description = "Already shared with this user."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn share_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
    Json(payload): Json<ShareMediaRequest>,
) -> Result<(StatusCode, Json<SharingGrant>), SharingError> {
    let grant = share_media(
        &context.pool,
        &media_id,
        user.id,
        payload.user_id,
        payload.can_download,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(grant)))
}

/// Stop sharing a media item with a user. Owner only.
#[utoipa::path(
    delete,
    path = "/media/{media_id}/share/{user_id}",
    tag = "Sharing",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item."),
        ("user_id" = i64, Path, description = "The user to revoke access from.")
    ),
    responses(
        (status = 204, description = "Grant removed."),
        (status = 403, description = "Only the owner can manage sharing."),
        (status = 404, description = "No such media item or grant."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn unshare_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path((media_id, target_user_id)): Path<(String, i64)>,
) -> Result<StatusCode, SharingError> {
    unshare_media(&context.pool, &media_id, user.id, target_user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Who a media item is shared with. Owner only.
#[utoipa::path(
    get,
    path = "/media/{media_id}/share",
    tag = "Sharing",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    responses(
        (status = 200, description = "All grants on the item.", body = Vec<SharingGrant>),
        (status = 403, description = "Only the owner can manage sharing."),
        (status = 404, description = "No such media item."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_shares_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
) -> Result<Json<Vec<SharingGrant>>, SharingError> {
    let grants = shared_with(&context.pool, &media_id, user.id).await?;
    Ok(Json(grants))
}

/// Share every current member of an album with the given users.
///
/// Snapshot semantics: media added to the album later is not retroactively
/// shared. Already-shared pairs are skipped.
#[utoipa::path(
    post,
    path = "/album/{album_id}/share",
    tag = "Sharing",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album.")
    ),
    request_body = ShareAlbumRequest,
    responses(
        (status = 200, description = "Members shared.", body = ShareAlbumResponse),
        (status = 403, description = "Only the owner can manage sharing."),
        (status = 404, description = "No such album."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn share_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(album_id): Path<String>,
    Json(payload): Json<ShareAlbumRequest>,
) -> Result<Json<ShareAlbumResponse>, SharingError> {
    let granted = share_album(
        &context.pool,
        &album_id,
        user.id,
        &payload.user_ids,
        payload.can_download,
    )
    .await?;
    Ok(Json(ShareAlbumResponse { granted }))
}
