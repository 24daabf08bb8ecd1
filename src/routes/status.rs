use axum::Json;
use serde_json::{json, Value};

use crate::{
    constants::{version::get_version, STARTUP_TIME},
    db,
    error::ApiResult,
    session::Session,
};

/// Reports build and runtime information plus row counts.
#[tracing::instrument(skip_all)]
pub async fn status(mut session: Session) -> ApiResult<Json<Value>> {
    let authors = db::authors::count(session.conn()).await?;
    let quotes = db::quotes::count(session.conn()).await?;

    Ok(Json(json!({
        "version": get_version(),
        "rust": rustc_version_runtime::version().to_string(),
        "uptime_seconds": STARTUP_TIME.elapsed().unwrap_or_default().as_secs(),
        "authors": authors,
        "quotes": quotes,
    })))
}
