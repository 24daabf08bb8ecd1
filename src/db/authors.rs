use sqlx::SqliteConnection;

use crate::models::{Author, AuthorName};

#[tracing::instrument(skip(conn))]
pub async fn list_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Author>> {
    sqlx::query_as::<_, Author>(
        r#"
            SELECT
                id, first, last
            FROM author
            ORDER BY id;
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when fetching authors"))
}

#[tracing::instrument(skip(conn))]
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Author>> {
    sqlx::query_as::<_, Author>(
        r#"
            SELECT
                id, first, last
            FROM author
            WHERE id = $1;
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .inspect_err(|e| tracing::error!(err = ?e, id = %id, "an error occurred when fetching author"))
}

#[tracing::instrument(skip(conn))]
pub async fn find_by_name(
    conn: &mut SqliteConnection,
    name: &AuthorName,
) -> sqlx::Result<Option<Author>> {
    sqlx::query_as::<_, Author>(
        r#"
            SELECT
                id, first, last
            FROM author
            WHERE first = $1 AND last = $2;
        "#,
    )
    .bind(&name.first)
    .bind(&name.last)
    .fetch_optional(&mut *conn)
    .await
    .inspect_err(|e| {
        tracing::error!(err = ?e, first = %name.first, last = %name.last, "an error occurred when fetching author by name");
    })
}

#[tracing::instrument(skip(conn))]
pub async fn insert(conn: &mut SqliteConnection, name: &AuthorName) -> sqlx::Result<Author> {
    let result = sqlx::query(
        r#"
            INSERT INTO
                author (first, last)
            VALUES
                ($1, $2);
        "#,
    )
    .bind(&name.first)
    .bind(&name.last)
    .execute(&mut *conn)
    .await?;

    Ok(Author {
        id: result.last_insert_rowid(),
        first: name.first.clone(),
        last: name.last.clone(),
    })
}

/// Returns the author with this exact name, creating it if needed. The flag
/// is `true` when a new row was inserted.
#[tracing::instrument(skip(conn))]
pub async fn find_or_create(
    conn: &mut SqliteConnection,
    name: &AuthorName,
) -> sqlx::Result<(Author, bool)> {
    if let Some(author) = find_by_name(conn, name).await? {
        return Ok((author, false));
    }

    insert_or_reuse(conn, name).await
}

/// Inserts the author, or resolves to the existing row when the unique index
/// on `(first, last)` reports that another writer created it first.
#[tracing::instrument(skip(conn))]
pub async fn insert_or_reuse(
    conn: &mut SqliteConnection,
    name: &AuthorName,
) -> sqlx::Result<(Author, bool)> {
    match insert(conn, name).await {
        Ok(author) => {
            tracing::info!(id = %author.id, first = %author.first, last = %author.last, "created new author");
            Ok((author, true))
        }
        Err(e)
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()) =>
        {
            tracing::warn!(first = %name.first, last = %name.last, "author was created concurrently, reusing it");

            find_by_name(conn, name)
                .await?
                .map(|author| (author, false))
                .ok_or(sqlx::Error::RowNotFound)
        }
        Err(e) => {
            tracing::error!(err = ?e, first = %name.first, last = %name.last, "an error occurred when adding author");
            Err(e)
        }
    }
}

#[tracing::instrument(skip(conn))]
pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM author;")
        .fetch_one(&mut *conn)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when counting authors"))
}
