use crate::api::sharing::error::SharingError;
use crate::database::{AlbumStore, MediaStore, SharingGrant, SharingStore};
use sqlx::SqlitePool;
use tracing::{info, instrument};

/// Grants another user read access to one media item.
///
/// Only the owner may share; a second grant for the same (media, user) pair
/// is rejected, not merged.
#[instrument(skip(pool))]
pub async fn share_media(
    pool: &SqlitePool,
    media_item_id: &str,
    grantor_id: i64,
    target_user_id: i64,
    can_download: bool,
) -> Result<SharingGrant, SharingError> {
    let Some(owner_id) = MediaStore::find_owner_by_id(pool, media_item_id).await? else {
        return Err(SharingError::NotFound(media_item_id.to_string()));
    };
    if owner_id != grantor_id {
        return Err(SharingError::NotOwner);
    }

    let Some(grant) =
        SharingStore::insert_grant(pool, media_item_id, target_user_id, can_download).await?
    else {
        return Err(SharingError::DuplicateGrant);
    };
    info!(media_item_id, target_user_id, "created sharing grant");

    Ok(grant)
}

/// Revokes a grant. Only the owner may unshare.
#[instrument(skip(pool))]
pub async fn unshare_media(
    pool: &SqlitePool,
    media_item_id: &str,
    owner_id: i64,
    target_user_id: i64,
) -> Result<(), SharingError> {
    let Some(actual_owner) = MediaStore::find_owner_by_id(pool, media_item_id).await? else {
        return Err(SharingError::NotFound(media_item_id.to_string()));
    };
    if actual_owner != owner_id {
        return Err(SharingError::NotOwner);
    }

    if !SharingStore::delete_grant(pool, media_item_id, target_user_id).await? {
        return Err(SharingError::NotFound(format!(
            "no grant for user {target_user_id}"
        )));
    }

    Ok(())
}

/// Lists who a media item is shared with. Owner only.
#[instrument(skip(pool))]
pub async fn shared_with(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
) -> Result<Vec<SharingGrant>, SharingError> {
    let Some(owner_id) = MediaStore::find_owner_by_id(pool, media_item_id).await? else {
        return Err(SharingError::NotFound(media_item_id.to_string()));
    };
    if owner_id != user_id {
        return Err(SharingError::NotOwner);
    }

    Ok(SharingStore::list_for_media(pool, media_item_id).await?)
}

/// Shares every *current* member of an album with the given users.
///
/// This is a snapshot operation: media added to the album afterwards is not
/// retroactively shared. Pairs that are already shared are skipped.
#[instrument(skip(pool))]
pub async fn share_album(
    pool: &SqlitePool,
    album_id: &str,
    grantor_id: i64,
    target_user_ids: &[i64],
    can_download: bool,
) -> Result<u64, SharingError> {
    let Some(owner_id) = AlbumStore::find_owner_by_id(pool, album_id).await? else {
        return Err(SharingError::NotFound(album_id.to_string()));
    };
    if owner_id != grantor_id {
        return Err(SharingError::NotOwner);
    }

    let member_ids = MediaStore::list_ids_by_album(pool, album_id).await?;

    let mut granted = 0u64;
    for media_item_id in &member_ids {
        for target_user_id in target_user_ids {
            let inserted =
                SharingStore::insert_grant(pool, media_item_id, *target_user_id, can_download)
                    .await?;
            if inserted.is_some() {
                granted += 1;
            }
        }
    }
    info!(album_id, granted, "shared album members");

    Ok(granted)
}
