use crate::api_state::ApiContext;
use crate::routes::auth::middleware::ApiUser;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::album::error::AlbumError;
use common_services::api::album::interfaces::{
    AlbumDetailsResponse, CreateAlbumRequest, UpdateAlbumRequest,
};
use common_services::api::album::service::{
    create_album, delete_album, get_album_details, list_albums, update_album,
};
use common_services::database::{Album, AlbumWithCount};
use tracing::info;

/// Create a new album owned by the current user.
#[utoipa::path(
    post,
    path = "/album",
    tag = "Album",
    request_body = CreateAlbumRequest,
    responses(
        (status = 201, description = "Album created.", body = Album),
        (status = 400, description = "Album name missing."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Json(payload): Json<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<Album>), AlbumError> {
    info!("Create album handler {:?}", payload);
    let album = create_album(
        &context.pool,
        user.id,
        &payload.name,
        payload.description.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// The current user's albums, with member counts.
#[utoipa::path(
    get,
    path = "/album",
    tag = "Album",
    responses(
        (status = 200, description = "The user's albums.", body = Vec<AlbumWithCount>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_albums_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
) -> Result<Json<Vec<AlbumWithCount>>, AlbumError> {
    let albums = list_albums(&context.pool, user.id).await?;
    Ok(Json(albums))
}

/// Album details, with the members the user may see.
///
/// Accessible to the owner and to anyone who has at least one member item
/// shared with them; those users only see their shared items.
#[utoipa::path(
    get,
    path = "/album/{album_id}",
    tag = "Album",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album.")
    ),
    responses(
        (status = 200, description = "Album details.", body = AlbumDetailsResponse),
        (status = 403, description = "The album exists but nothing in it is shared with the user."),
        (status = 404, description = "No such album."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_album_details_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(album_id): Path<String>,
) -> Result<Json<AlbumDetailsResponse>, AlbumError> {
    let details = get_album_details(&context.pool, &album_id, user.id).await?;
    Ok(Json(details))
}

/// Update an album's name, description or cover photo. Owner only.
#[utoipa::path(
    put,
    path = "/album/{album_id}",
    tag = "Album",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album.")
    ),
    request_body = UpdateAlbumRequest,
    responses(
        (status = 200, description = "Updated album.", body = Album),
        (status = 400, description = "The cover is not a member of this album."),
        (status = 403, description = "Only the owner can update an album."),
        (status = 404, description = "No such album."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(album_id): Path<String>,
    Json(payload): Json<UpdateAlbumRequest>,
) -> Result<Json<Album>, AlbumError> {
    let album = update_album(
        &context.pool,
        &album_id,
        user.id,
        payload.name,
        payload.description,
        payload.cover_media_id,
    )
    .await?;
    Ok(Json(album))
}

/// Delete an album. Member media items are kept, only their album
/// association is cleared. Owner only.
#[utoipa::path(
    delete,
    path = "/album/{album_id}",
    tag = "Album",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album.")
    ),
    responses(
        (status = 204, description = "Album deleted."),
        (status = 403, description = "Only the owner can delete an album."),
        (status = 404, description = "No such album."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(album_id): Path<String>,
) -> Result<StatusCode, AlbumError> {
    delete_album(&context.pool, &album_id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
