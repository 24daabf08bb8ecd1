use std::time::Instant;

use axum::{
    extract::{rejection::PathRejection, Path, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower::ServiceBuilder;

use crate::{
    error::{ApiError, ApiResult},
    Data,
};

pub mod authors;
pub mod quotes;
pub mod status;

pub fn router(data: Data) -> Router {
    Router::new()
        .route("/authors", get(authors::list_authors))
        .route("/authors/:id", get(authors::get_author))
        .route("/quotes", get(quotes::list_quotes).post(quotes::new_quote))
        .route("/quotes/", get(quotes::list_quotes).post(quotes::new_quote))
        .route("/quotes/:id", get(quotes::get_quote))
        .route("/status", get(status::status))
        .fallback(not_found)
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_request)))
        .with_state(data)
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Row ids in paths are unsigned integers. Anything that doesn't parse as one
/// is an unknown route; an id past `i64::MAX` can't name a row.
fn row_id(id: Result<Path<u64>, PathRejection>, resource: &'static str) -> ApiResult<i64> {
    let Path(id) = id.map_err(|_| ApiError::RouteNotFound)?;

    i64::try_from(id).map_err(|_| ApiError::NotFound(resource))
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );

    response
}
