use crate::database::{CreateMediaItem, DbError, MediaItem};
use chrono::Utc;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, Sqlite};

pub struct MediaStore;

impl MediaStore {
    /// Inserts a media item. Callers must only do this after the bytes are
    /// confirmed stored at the cloud provider.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        id: &str,
        item: &CreateMediaItem,
    ) -> Result<MediaItem, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            r#"
            INSERT INTO media_item (
                id, owner_id, cloud_provider, cloud_file_id, filename, kind,
                size_bytes, thumbnail_path, uploaded_at, captured_at, album_id, caption
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(item.owner_id)
        .bind(item.cloud_provider)
        .bind(&item.cloud_file_id)
        .bind(&item.filename)
        .bind(item.kind)
        .bind(item.size_bytes)
        .bind(&item.thumbnail_path)
        .bind(Utc::now())
        .bind(item.captured_at)
        .bind(&item.album_id)
        .bind(&item.caption)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
    ) -> Result<Option<MediaItem>, DbError> {
        Ok(
            sqlx::query_as::<_, MediaItem>("SELECT * FROM media_item WHERE id = ?1")
                .bind(media_item_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn find_owner_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
    ) -> Result<Option<i64>, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT owner_id FROM media_item WHERE id = ?1")
                .bind(media_item_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// A page of a user's own media, newest uploads first.
    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaItem>, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            r#"
            SELECT *
            FROM media_item
            WHERE owner_id = ?1
            ORDER BY uploaded_at DESC, id
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?)
    }

    pub async fn count_by_owner(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media_item WHERE owner_id = ?1")
                .bind(owner_id)
                .fetch_one(executor)
                .await?,
        )
    }

    /// Media other users have shared with this user, newest uploads first.
    pub async fn list_shared_with(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<Vec<MediaItem>, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            r#"
            SELECT m.*
            FROM media_item m
            JOIN sharing_grant g ON g.media_item_id = m.id
            WHERE g.shared_with_user_id = ?1
            ORDER BY m.uploaded_at DESC, m.id
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Members of an album that the given user may see: their own items plus
    /// items individually shared with them. Album access alone grants nothing
    /// per item.
    pub async fn list_by_album_visible_to(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        user_id: i64,
    ) -> Result<Vec<MediaItem>, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            r#"
            SELECT m.*
            FROM media_item m
            WHERE m.album_id = ?1
              AND (
                m.owner_id = ?2
                OR EXISTS (
                    SELECT 1 FROM sharing_grant g
                    WHERE g.media_item_id = m.id AND g.shared_with_user_id = ?2
                )
              )
            ORDER BY m.uploaded_at DESC, m.id
            "#,
        )
        .bind(album_id)
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Ids of every current member of an album.
    pub async fn list_ids_by_album(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Vec<String>, DbError> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT id FROM media_item WHERE album_id = ?1")
                .bind(album_id)
                .fetch_all(executor)
                .await?,
        )
    }

    /// Moves a media item into an album, or out of any album when `None`.
    pub async fn set_album(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
        album_id: Option<&str>,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(
            sqlx::query("UPDATE media_item SET album_id = ?1 WHERE id = ?2")
                .bind(album_id)
                .bind(media_item_id)
                .execute(executor)
                .await?,
        )
    }

    /// Clears the album association of every member. Media items themselves
    /// are kept.
    pub async fn clear_album_members(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(
            sqlx::query("UPDATE media_item SET album_id = NULL WHERE album_id = ?1")
                .bind(album_id)
                .execute(executor)
                .await?,
        )
    }

    /// Deletes a media item, returning its thumbnail path so the caller can
    /// remove the file. Grants and comments cascade.
    pub async fn delete(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
    ) -> Result<Option<Option<String>>, DbError> {
        Ok(sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM media_item WHERE id = ?1 RETURNING thumbnail_path",
        )
        .bind(media_item_id)
        .fetch_optional(executor)
        .await?)
    }
}
