use crate::database::{Album, AlbumWithCount, DbError};
use chrono::Utc;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, Sqlite};

pub struct AlbumStore;

impl AlbumStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        owner_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            INSERT INTO album (id, owner_id, name, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(album_id)
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Option<Album>, DbError> {
        Ok(
            sqlx::query_as::<_, Album>("SELECT * FROM album WHERE id = ?1")
                .bind(album_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn find_owner_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Option<i64>, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT owner_id FROM album WHERE id = ?1")
                .bind(album_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// A user's own albums with member counts, newest first.
    pub async fn list_by_owner_with_count(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
    ) -> Result<Vec<AlbumWithCount>, DbError> {
        Ok(sqlx::query_as::<_, AlbumWithCount>(
            r#"
            SELECT
                a.id,
                a.owner_id,
                a.name,
                a.description,
                a.cover_media_id,
                a.created_at,
                COUNT(m.id) AS media_count,
                MAX(m.uploaded_at) AS last_uploaded_at
            FROM album a
            LEFT JOIN media_item m ON m.album_id = a.id
            WHERE a.owner_id = ?1
            GROUP BY a.id
            ORDER BY a.created_at DESC, a.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await?)
    }

    /// Updates album details. Absent fields keep their current value.
    pub async fn update(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        name: Option<&str>,
        description: Option<&str>,
        cover_media_id: Option<&str>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r#"
            UPDATE album
            SET
                name = COALESCE(?1, name),
                description = COALESCE(?2, description),
                cover_media_id = COALESCE(?3, cover_media_id)
            WHERE id = ?4
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(cover_media_id)
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM album WHERE id = ?1")
            .bind(album_id)
            .execute(executor)
            .await?)
    }
}
