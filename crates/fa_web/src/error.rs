use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// The model's raw output was not parseable JSON
    InvalidModelOutput,

    /// Any pipeline failure, reported with its message
    Pipeline(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match self {
            ApiError::InvalidModelOutput => "Model did not return valid JSON.".to_string(),
            ApiError::Pipeline(message) => message,
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { detail }),
        )
            .into_response()
    }
}
