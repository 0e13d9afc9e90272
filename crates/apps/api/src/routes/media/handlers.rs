use crate::api_state::ApiContext;
use crate::routes::auth::middleware::ApiUser;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::media::error::MediaError;
use common_services::api::media::interfaces::{
    DownloadUrlResponse, GalleryPage, GalleryParams, SetAlbumRequest,
};
use common_services::api::media::service::{
    delete_media, download_url, get_media, list_gallery, list_shared, set_album, upload_media,
    UploadMedia,
};
use common_services::database::MediaItem;
use tracing::instrument;

/// Upload a photo or video.
///
/// Multipart form with a `file` part and optional `caption` / `albumId`
/// text parts. The file is stored in the uploader's connected cloud drive
/// before anything is recorded locally.
#[utoipa::path(
    post,
    path = "/media",
    tag = "Media",
    responses(
        (status = 201, description = "Media uploaded and recorded.", body = MediaItem),
        (status = 409, description = "Cloud storage is not connected."),
        (status = 413, description = "File exceeds the maximum allowed size."),
        (status = 415, description = "File type not allowed."),
        (status = 502, description = "The cloud provider rejected the upload."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, multipart))]
pub async fn upload_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaItem>), MediaError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut caption: Option<String> = None;
    let mut album_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MediaError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(ToOwned::to_owned)
                    .unwrap_or_else(|| "upload".to_string());
                let mime_type = field.content_type().map(ToOwned::to_owned).unwrap_or_else(|| {
                    mime_guess::from_path(&filename)
                        .first_or_octet_stream()
                        .essence_str()
                        .to_string()
                });
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| MediaError::BadRequest(e.to_string()))?
                    .to_vec();
                file = Some((filename, mime_type, bytes));
            }
            Some("caption") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| MediaError::BadRequest(e.to_string()))?;
                caption = Some(text).filter(|t| !t.trim().is_empty());
            }
            Some("albumId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| MediaError::BadRequest(e.to_string()))?;
                album_id = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    let Some((filename, mime_type, bytes)) = file else {
        return Err(MediaError::BadRequest("No file uploaded.".to_string()));
    };

    let item = upload_media(
        &context.pool,
        &context.tokens,
        &context.settings.storage,
        user.id,
        UploadMedia {
            filename,
            mime_type,
            bytes,
            caption,
            album_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// A page of the current user's own media, newest first.
#[utoipa::path(
    get,
    path = "/media",
    tag = "Media",
    params(GalleryParams),
    responses(
        (status = 200, description = "A page of the user's media.", body = GalleryPage),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_gallery_handler(
    State(context): State<ApiContext>,
    Query(params): Query<GalleryParams>,
    Extension(user): Extension<ApiUser>,
) -> Result<Json<GalleryPage>, MediaError> {
    let page = list_gallery(&context.pool, user.id, &params).await?;
    Ok(Json(page))
}

/// Media items other users have shared with the current user.
#[utoipa::path(
    get,
    path = "/media/shared",
    tag = "Media",
    responses(
        (status = 200, description = "Media shared with the user.", body = Vec<MediaItem>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_shared_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
) -> Result<Json<Vec<MediaItem>>, MediaError> {
    let media = list_shared(&context.pool, user.id).await?;
    Ok(Json(media))
}

/// A single media item the user owns or was granted access to.
#[utoipa::path(
    get,
    path = "/media/{media_id}",
    tag = "Media",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    responses(
        (status = 200, description = "The media item.", body = MediaItem),
        (status = 403, description = "The item exists but is not shared with the user."),
        (status = 404, description = "No such media item."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
) -> Result<Json<MediaItem>, MediaError> {
    let item = get_media(&context.pool, &media_id, user.id).await?;
    Ok(Json(item))
}

/// Delete a media item. Owner only.
#[utoipa::path(
    delete,
    path = "/media/{media_id}",
    tag = "Media",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    responses(
        (status = 204, description = "Media item deleted."),
        (status = 403, description = "Only the owner can delete media."),
        (status = 404, description = "No such media item."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
) -> Result<StatusCode, MediaError> {
    delete_media(&context.pool, &context.settings.storage, &media_id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A direct download URL for the media bytes.
#[utoipa::path(
    get,
    path = "/media/{media_id}/download",
    tag = "Media",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    responses(
        (status = 200, description = "A short-lived download URL.", body = DownloadUrlResponse),
        (status = 403, description = "No access, or shared without download permission."),
        (status = 404, description = "No such media item."),
        (status = 409, description = "The owner's cloud storage is not connected."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_download_url_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
) -> Result<Json<DownloadUrlResponse>, MediaError> {
    let response = download_url(&context.pool, &context.tokens, &media_id, user.id).await?;
    Ok(Json(response))
}

/// Move a media item into an album, or out of its album.
#[utoipa::path(
    put,
    path = "/media/{media_id}/album",
    tag = "Media",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    request_body = SetAlbumRequest,
    responses(
        (status = 200, description = "Updated media item.", body = MediaItem),
        (status = 403, description = "Only the owner can organize media."),
        (status = 404, description = "No such media item."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_media_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
    Json(payload): Json<SetAlbumRequest>,
) -> Result<Json<MediaItem>, MediaError> {
    let item = set_album(&context.pool, &media_id, user.id, payload.album_id).await?;
    Ok(Json(item))
}
