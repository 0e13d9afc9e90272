//! Who may see or change what.
//!
//! Every predicate takes the acting user id explicitly; there is no ambient
//! current-user state anywhere below this point. Missing entities fold into
//! `false` here; the API layer decides whether that surfaces as 404 or 403
//! by checking existence first.

use crate::database::{AlbumStore, CommentStore, DbError, MediaStore, SharingStore};
use sqlx::SqlitePool;

/// A user can view a media item iff they own it or hold a sharing grant
/// for it.
pub async fn can_access_media(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
) -> Result<bool, DbError> {
    let Some(owner_id) = MediaStore::find_owner_by_id(pool, media_item_id).await? else {
        return Ok(false);
    };
    if owner_id == user_id {
        return Ok(true);
    }
    SharingStore::grant_exists(pool, media_item_id, user_id).await
}

/// A user can view an album iff they own it or at least one member media
/// item is shared with them. Seeing the album does not imply seeing every
/// member; each item keeps its own access rule.
pub async fn can_access_album(
    pool: &SqlitePool,
    album_id: &str,
    user_id: i64,
) -> Result<bool, DbError> {
    let Some(owner_id) = AlbumStore::find_owner_by_id(pool, album_id).await? else {
        return Ok(false);
    };
    if owner_id == user_id {
        return Ok(true);
    }
    SharingStore::album_grant_exists(pool, album_id, user_id).await
}

/// Only the owner may change a media item; sharing never grants this.
pub async fn can_modify_media(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
) -> Result<bool, DbError> {
    let owner_id = MediaStore::find_owner_by_id(pool, media_item_id).await?;
    Ok(owner_id == Some(user_id))
}

/// Only the owner may change an album.
pub async fn can_modify_album(
    pool: &SqlitePool,
    album_id: &str,
    user_id: i64,
) -> Result<bool, DbError> {
    let owner_id = AlbumStore::find_owner_by_id(pool, album_id).await?;
    Ok(owner_id == Some(user_id))
}

/// A comment may be deleted by its author or by the owner of the media item
/// it is attached to.
pub async fn can_delete_comment(
    pool: &SqlitePool,
    comment_id: i64,
    user_id: i64,
) -> Result<bool, DbError> {
    let Some(comment) = CommentStore::find_by_id(pool, comment_id).await? else {
        return Ok(false);
    };
    if comment.author_id == user_id {
        return Ok(true);
    }
    let media_owner = MediaStore::find_owner_by_id(pool, &comment.media_item_id).await?;
    Ok(media_owner == Some(user_id))
}
