use crate::access;
use crate::api::comment::error::CommentError;
use crate::database::{Comment, CommentStore, MediaStore};
use sqlx::SqlitePool;
use tracing::instrument;

/// Comments on a media item the user can see, oldest first.
#[instrument(skip(pool))]
pub async fn list_comments(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
) -> Result<Vec<Comment>, CommentError> {
    ensure_media_access(pool, media_item_id, user_id).await?;
    Ok(CommentStore::list_for_media(pool, media_item_id).await?)
}

/// Adds a comment. The author must currently have access to the media item.
#[instrument(skip(pool, body))]
pub async fn add_comment(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
    body: &str,
) -> Result<Comment, CommentError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(CommentError::BadRequest(
            "Comment text required.".to_string(),
        ));
    }

    ensure_media_access(pool, media_item_id, user_id).await?;
    Ok(CommentStore::create(pool, media_item_id, user_id, body).await?)
}

/// Deletes a comment. Allowed for the comment's author and for the owner of
/// the media item it is attached to.
#[instrument(skip(pool))]
pub async fn delete_comment(
    pool: &SqlitePool,
    comment_id: i64,
    user_id: i64,
) -> Result<(), CommentError> {
    if CommentStore::find_by_id(pool, comment_id).await?.is_none() {
        return Err(CommentError::NotFound(format!("comment {comment_id}")));
    }
    if !access::can_delete_comment(pool, comment_id, user_id).await? {
        return Err(CommentError::Forbidden(
            "Only the author or the media owner can delete a comment.".to_string(),
        ));
    }

    CommentStore::delete(pool, comment_id).await?;
    Ok(())
}

async fn ensure_media_access(
    pool: &SqlitePool,
    media_item_id: &str,
    user_id: i64,
) -> Result<(), CommentError> {
    if MediaStore::find_owner_by_id(pool, media_item_id)
        .await?
        .is_none()
    {
        return Err(CommentError::NotFound(media_item_id.to_string()));
    }
    if !access::can_access_media(pool, media_item_id, user_id).await? {
        return Err(CommentError::Forbidden(
            "You do not have access to this media item.".to_string(),
        ));
    }
    Ok(())
}
