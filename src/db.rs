//! Data access for authors and quotes.
//!
//! Every function takes a plain `&mut SqliteConnection`, so callers can pass
//! either a pooled session or an open transaction.

use sqlx::{migrate::Migrator, SqliteConnection};

pub mod authors;
pub mod quotes;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Drops both tables and the migration bookkeeping so the next migration run
/// recreates the schema from scratch.
#[tracing::instrument(skip_all)]
pub async fn reset(conn: &mut SqliteConnection) -> sqlx::Result<()> {
    for table in ["quote", "author", "_sqlx_migrations"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table};"))
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!(err = ?e, table, "an error occurred when dropping table"))?;
    }

    tracing::info!("dropped existing tables");
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_connection() -> SqliteConnection {
    use sqlx::Connection;

    let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    MIGRATOR.run(&mut conn).await.unwrap();
    conn
}
