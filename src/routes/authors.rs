use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};
use serde_json::{json, Value};

use crate::{
    db,
    error::{ApiError, ApiResult},
    routes,
    schemas::{AuthorSchema, QuoteSchema},
    session::Session,
};

#[tracing::instrument(skip_all)]
pub async fn list_authors(mut session: Session) -> ApiResult<Json<Value>> {
    let authors = db::authors::list_all(session.conn()).await?;

    Ok(Json(json!({ "authors": AuthorSchema::dump_many(&authors) })))
}

#[tracing::instrument(skip_all)]
pub async fn get_author(
    id: Result<Path<u64>, PathRejection>,
    mut session: Session,
) -> ApiResult<Json<Value>> {
    let id = routes::row_id(id, "Author")?;

    let author = db::authors::find_by_id(session.conn(), id)
        .await?
        .ok_or(ApiError::NotFound("Author"))?;
    let quotes = db::quotes::list_by_author(session.conn(), author.id).await?;

    Ok(Json(json!({
        "author": AuthorSchema::dump(&author),
        "quotes": QuoteSchema::summarize_many(&quotes),
    })))
}
