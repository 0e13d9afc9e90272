use crate::database::{Comment, DbError};
use chrono::Utc;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, Sqlite};

pub struct CommentStore;

impl CommentStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
        author_id: i64,
        body: &str,
    ) -> Result<Comment, DbError> {
        Ok(sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comment (media_item_id, author_id, body, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING *
            "#,
        )
        .bind(media_item_id)
        .bind(author_id)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        comment_id: i64,
    ) -> Result<Option<Comment>, DbError> {
        Ok(
            sqlx::query_as::<_, Comment>("SELECT * FROM comment WHERE id = ?1")
                .bind(comment_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Comments on a media item, oldest first.
    pub async fn list_for_media(
        executor: impl Executor<'_, Database = Sqlite>,
        media_item_id: &str,
    ) -> Result<Vec<Comment>, DbError> {
        Ok(sqlx::query_as::<_, Comment>(
            "SELECT * FROM comment WHERE media_item_id = ?1 ORDER BY created_at, id",
        )
        .bind(media_item_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Sqlite>,
        comment_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM comment WHERE id = ?1")
            .bind(comment_id)
            .execute(executor)
            .await?)
    }
}
