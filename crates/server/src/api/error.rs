//! Translation of resolution outcomes into HTTP responses.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;

use pahescope_core::ResolveError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper carrying a [`ResolveError`] out of a handler.
pub struct ApiError(pub ResolveError);

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ResolveError::Validation(_) => StatusCode::BAD_REQUEST,
            ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
            ResolveError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
