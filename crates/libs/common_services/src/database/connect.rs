use crate::database::DbError;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &str = include_str!("schema.sql");

/// Open the database and bring the schema up to date.
pub async fn connect(database_url: &str) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    // SQLite allows a single writer; one pooled connection avoids
    // "database is locked" errors under concurrent requests.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Apply the schema. Idempotent, safe to run on every startup.
pub async fn migrate(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
