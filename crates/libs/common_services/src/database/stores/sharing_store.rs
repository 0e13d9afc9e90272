use crate::database::{DbError, SharingGrant};
use chrono::Utc;
use sqlx::{Executor, Sqlite};

pub struct SharingStore;

impl SharingStore {
    /// Creates a grant. Returns `None` when a grant for this (media, user)
    /// pair already exists; the unique constraint makes this race-correct.
    pub async fn insert_grant(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
        shared_with_user_id: i64,
        can_download: bool,
    ) -> Result<Option<SharingGrant>, DbError> {
        Ok(sqlx::query_as::<_, SharingGrant>(
            r#"
            INSERT INTO sharing_grant (media_item_id, shared_with_user_id, can_download, shared_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (media_item_id, shared_with_user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(media_item_id)
        .bind(shared_with_user_id)
        .bind(can_download)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await?)
    }

    /// Removes a grant. Returns whether one existed.
    pub async fn delete_grant(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
        shared_with_user_id: i64,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            "DELETE FROM sharing_grant WHERE media_item_id = ?1 AND shared_with_user_id = ?2",
        )
        .bind(media_item_id)
        .bind(shared_with_user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_grant(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
        shared_with_user_id: i64,
    ) -> Result<Option<SharingGrant>, DbError> {
        Ok(sqlx::query_as::<_, SharingGrant>(
            "SELECT * FROM sharing_grant WHERE media_item_id = ?1 AND shared_with_user_id = ?2",
        )
        .bind(media_item_id)
        .bind(shared_with_user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn grant_exists(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
        shared_with_user_id: i64,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM sharing_grant
                WHERE media_item_id = ?1 AND shared_with_user_id = ?2
            )
            "#,
        )
        .bind(media_item_id)
        .bind(shared_with_user_id)
        .fetch_one(executor)
        .await?)
    }

    /// Whether any member of the album is shared with the user. Computed by
    /// join at query time so it never goes stale as members come and go.
    pub async fn album_grant_exists(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        shared_with_user_id: i64,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM media_item m
                JOIN sharing_grant g ON g.media_item_id = m.id
                WHERE m.album_id = ?1 AND g.shared_with_user_id = ?2
            )
            "#,
        )
        .bind(album_id)
        .bind(shared_with_user_id)
        .fetch_one(executor)
        .await?)
    }

    /// All grants on one media item.
    pub async fn list_for_media(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
    ) -> Result<Vec<SharingGrant>, DbError> {
        Ok(sqlx::query_as::<_, SharingGrant>(
            "SELECT * FROM sharing_grant WHERE media_item_id = ?1 ORDER BY shared_at, id",
        )
        .bind(media_item_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn count_for_media(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sharing_grant WHERE media_item_id = ?1",
        )
        .bind(media_item_id)
        .fetch_one(executor)
        .await?)
    }
}
