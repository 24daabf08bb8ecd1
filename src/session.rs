use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::{pool::PoolConnection, Sqlite, SqliteConnection, Transaction};

use crate::{error::ApiError, Data};

/// A database session scoped to one request.
///
/// The pooled connection is acquired when the handler's arguments are
/// extracted and goes back to the pool when the session is dropped, whichever
/// way the handler exits.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub async fn acquire(data: &Data) -> Result<Self, sqlx::Error> {
        let conn = data.db.acquire().await.inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when acquiring a database session"),
        )?;
        tracing::debug!("acquired database session");

        Ok(Self { conn })
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Opens a write transaction on this session. Dropping it without
    /// [`Transaction::commit`] rolls it back.
    ///
    /// The write lock is taken up front with `BEGIN IMMEDIATE`, so concurrent
    /// writers queue on the busy timeout instead of failing when a read lock
    /// can't be upgraded.
    pub async fn begin(&mut self) -> Result<Transaction<'_, Sqlite>, sqlx::Error> {
        sqlx::Connection::begin_with(&mut *self.conn, "BEGIN IMMEDIATE")
            .await
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when opening a transaction"))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!("released database session");
    }
}

#[async_trait]
impl FromRequestParts<Data> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, data: &Data) -> Result<Self, Self::Rejection> {
        Ok(Session::acquire(data).await?)
    }
}
