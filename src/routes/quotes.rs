use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path},
    Json,
};
use serde_json::{json, Value};
use time::OffsetDateTime;

use crate::{
    db,
    error::{ApiError, ApiResult},
    routes,
    schemas::{is_falsy, QuoteSchema},
    session::Session,
};

#[tracing::instrument(skip_all)]
pub async fn list_quotes(mut session: Session) -> ApiResult<Json<Value>> {
    let quotes = db::quotes::list_all(session.conn()).await?;

    Ok(Json(json!({ "quotes": QuoteSchema::summarize_many(&quotes) })))
}

#[tracing::instrument(skip_all)]
pub async fn get_quote(
    id: Result<Path<u64>, PathRejection>,
    mut session: Session,
) -> ApiResult<Json<Value>> {
    let id = routes::row_id(id, "Quote")?;

    let quote = db::quotes::find_by_id(session.conn(), id)
        .await?
        .ok_or(ApiError::NotFound("Quote"))?;

    Ok(Json(json!({ "quote": QuoteSchema::dump(&quote) })))
}

#[tracing::instrument(skip_all)]
pub async fn new_quote(mut session: Session, body: Bytes) -> ApiResult<Json<Value>> {
    let payload = parse_body(&body)?;
    let new_quote = QuoteSchema::load(&payload)?;

    let mut tx = session.begin().await?;

    let (author, _) = db::authors::find_or_create(&mut tx, &new_quote.author).await?;
    let id = db::quotes::insert(
        &mut tx,
        &new_quote.content,
        author.id,
        OffsetDateTime::now_utc(),
    )
    .await?;
    let quote = db::quotes::find_by_id(&mut tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tx.commit()
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when committing new quote"))?;

    tracing::info!(id = %quote.id, author_id = %author.id, "created new quote");

    Ok(Json(json!({
        "message": "Created new quote.",
        "quote": QuoteSchema::dump(&quote),
    })))
}

/// An empty body, or one that decodes to a falsy JSON value, counts as
/// missing input.
fn parse_body(body: &[u8]) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingInput);
    }

    let payload: Value = serde_json::from_slice(body).map_err(ApiError::MalformedJson)?;

    if is_falsy(&payload) {
        return Err(ApiError::MissingInput);
    }

    Ok(payload)
}
