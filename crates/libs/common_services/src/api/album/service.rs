use crate::access;
use crate::api::album::error::AlbumError;
use crate::api::album::interfaces::AlbumDetailsResponse;
use crate::database::{Album, AlbumStore, AlbumWithCount, MediaStore};
use crate::utils::nice_id;
use app_state::ALBUM_ID_LENGTH;
use sqlx::SqlitePool;
use tracing::{info, instrument};

#[instrument(skip(pool))]
pub async fn create_album(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<Album, AlbumError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AlbumError::BadRequest("Album name required.".to_string()));
    }

    let album_id = nice_id(ALBUM_ID_LENGTH);
    let album = AlbumStore::create(pool, &album_id, user_id, name, description).await?;
    info!(album_id = %album.id, "created album");

    Ok(album)
}

/// The user's own albums with member counts.
#[instrument(skip(pool))]
pub async fn list_albums(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<AlbumWithCount>, AlbumError> {
    Ok(AlbumStore::list_by_owner_with_count(pool, user_id).await?)
}

/// Album details with the member media items the user may see.
///
/// Access follows the derived rule: the owner, or anyone with at least one
/// member shared with them. Non-owners only see the members they hold
/// grants for.
#[instrument(skip(pool))]
pub async fn get_album_details(
    pool: &SqlitePool,
    album_id: &str,
    user_id: i64,
) -> Result<AlbumDetailsResponse, AlbumError> {
    let Some(album) = AlbumStore::find_by_id(pool, album_id).await? else {
        return Err(AlbumError::NotFound(album_id.to_string()));
    };
    if !access::can_access_album(pool, album_id, user_id).await? {
        return Err(AlbumError::Forbidden(
            "You do not have access to this album.".to_string(),
        ));
    }

    let media_items = MediaStore::list_by_album_visible_to(pool, album_id, user_id).await?;

    Ok(AlbumDetailsResponse {
        id: album.id,
        owner_id: album.owner_id,
        name: album.name,
        description: album.description,
        cover_media_id: album.cover_media_id,
        created_at: album.created_at,
        media_items,
    })
}

/// Updates name, description and/or cover. Owner only. A new cover must be
/// a member of the album.
#[instrument(skip(pool))]
pub async fn update_album(
    pool: &SqlitePool,
    album_id: &str,
    user_id: i64,
    name: Option<String>,
    description: Option<String>,
    cover_media_id: Option<String>,
) -> Result<Album, AlbumError> {
    let Some(owner_id) = AlbumStore::find_owner_by_id(pool, album_id).await? else {
        return Err(AlbumError::NotFound(album_id.to_string()));
    };
    if owner_id != user_id {
        return Err(AlbumError::Forbidden(
            "Only the owner can update an album.".to_string(),
        ));
    }

    if let Some(cover_media_id) = &cover_media_id {
        let member = MediaStore::find_by_id(pool, cover_media_id)
            .await?
            .is_some_and(|media| media.album_id.as_deref() == Some(album_id));
        if !member {
            return Err(AlbumError::BadRequest(
                "The cover must be a media item in this album.".to_string(),
            ));
        }
    }

    Ok(AlbumStore::update(
        pool,
        album_id,
        name.as_deref(),
        description.as_deref(),
        cover_media_id.as_deref(),
    )
    .await?)
}

/// Deletes an album. Members are disassociated, never deleted.
#[instrument(skip(pool))]
pub async fn delete_album(
    pool: &SqlitePool,
    album_id: &str,
    user_id: i64,
) -> Result<(), AlbumError> {
    let Some(owner_id) = AlbumStore::find_owner_by_id(pool, album_id).await? else {
        return Err(AlbumError::NotFound(album_id.to_string()));
    };
    if owner_id != user_id {
        return Err(AlbumError::Forbidden(
            "Only the owner can delete an album.".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    MediaStore::clear_album_members(&mut *tx, album_id).await?;
    AlbumStore::delete(&mut *tx, album_id).await?;
    tx.commit().await?;
    info!(album_id, "deleted album");

    Ok(())
}
