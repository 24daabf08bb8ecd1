use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::schemas::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no input data provided")]
    MissingInput,

    #[error("request body is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("{0} could not be found")]
    NotFound(&'static str),

    #[error("route not found")]
    RouteNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingInput | ApiError::MalformedJson(_) | ApiError::NotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::MissingInput => message(status, "No input data provided"),
            ApiError::MalformedJson(e) => {
                tracing::debug!(err = ?e, "rejected malformed request body");
                message(status, "Request body is not valid JSON.")
            }
            ApiError::NotFound(entity) => message(status, format!("{entity} could not be found.")),
            ApiError::RouteNotFound => message(status, "Not found."),
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            ApiError::Database(e) => {
                tracing::error!(err = ?e, "request failed with a database error");
                message(status, "Internal server error.")
            }
        }
    }
}
