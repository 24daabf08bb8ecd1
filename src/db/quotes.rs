use sqlx::SqliteConnection;
use time::OffsetDateTime;

use crate::models::{quotes::QuoteRow, Quote};

const QUOTE_SELECT_SQL: &str = r#"
    SELECT
        q.id,
        q.content,
        q.posted_at,
        a.id AS author_id,
        a.first AS author_first,
        a.last AS author_last
    FROM quote q
    INNER JOIN author a ON a.id = q.author_id
"#;

#[tracing::instrument(skip(conn))]
pub async fn list_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Quote>> {
    let rows = sqlx::query_as::<_, QuoteRow>(&format!("{QUOTE_SELECT_SQL} ORDER BY q.id;"))
        .fetch_all(&mut *conn)
        .await
        .inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when fetching quotes from database"),
        )?;

    Ok(rows.into_iter().map(Quote::from).collect())
}

#[tracing::instrument(skip(conn))]
pub async fn list_by_author(
    conn: &mut SqliteConnection,
    author_id: i64,
) -> sqlx::Result<Vec<Quote>> {
    let rows = sqlx::query_as::<_, QuoteRow>(&format!(
        "{QUOTE_SELECT_SQL} WHERE q.author_id = $1 ORDER BY q.id;"
    ))
    .bind(author_id)
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| {
        tracing::error!(err = ?e, author_id = %author_id, "an error occurred when fetching quotes for author");
    })?;

    Ok(rows.into_iter().map(Quote::from).collect())
}

#[tracing::instrument(skip(conn))]
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Quote>> {
    let row = sqlx::query_as::<_, QuoteRow>(&format!("{QUOTE_SELECT_SQL} WHERE q.id = $1;"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .inspect_err(
            |e| tracing::error!(err = ?e, id = %id, "an error occurred when fetching quote"),
        )?;

    Ok(row.map(Quote::from))
}

/// Inserts a quote and returns its id.
#[tracing::instrument(skip(conn, content))]
pub async fn insert(
    conn: &mut SqliteConnection,
    content: &str,
    author_id: i64,
    posted_at: OffsetDateTime,
) -> sqlx::Result<i64> {
    let result = sqlx::query(
        r#"
            INSERT INTO
                quote (content, author_id, posted_at)
            VALUES
                ($1, $2, $3);
        "#,
    )
    .bind(content)
    .bind(author_id)
    .bind(posted_at)
    .execute(&mut *conn)
    .await
    .inspect_err(|e| {
        tracing::error!(err = ?e, author_id = %author_id, "an error occurred when adding quote");
    })?;

    Ok(result.last_insert_rowid())
}

#[tracing::instrument(skip(conn))]
pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quote;")
        .fetch_one(&mut *conn)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when counting quotes"))
}
