use crate::database::{CloudCredential, CloudProvider, DbError};
use sqlx::{Executor, Sqlite};

pub struct CredentialStore;

impl CredentialStore {
    pub async fn find(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
        provider: CloudProvider,
    ) -> Result<Option<CloudCredential>, DbError> {
        Ok(sqlx::query_as::<_, CloudCredential>(
            "SELECT * FROM cloud_credential WHERE user_id = ?1 AND provider = ?2",
        )
        .bind(user_id)
        .bind(provider)
        .fetch_optional(executor)
        .await?)
    }

    /// Stores a credential, replacing any existing row for the same
    /// (user, provider) pair wholesale. There are no partial updates.
    pub async fn upsert(
        executor: impl Executor<'_, Database = Sqlite>,
        credential: &CloudCredential,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO cloud_credential (user_id, provider, access_token, refresh_token, expires_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (user_id, provider) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(credential.user_id)
        .bind(credential.provider)
        .bind(&credential.access_token)
        .bind(&credential.refresh_token)
        .bind(credential.expires_at)
        .execute(executor)
        .await?;
        Ok(())
    }
}
