use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::calendar::CoordinateError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("coordinate error: {0}")]
    Coordinate(#[from] CoordinateError),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("no active booking session")]
    NoSession,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // malformed labels mean the caller's grid generation is
            // broken, not that the user picked a bad slot
            AppError::Coordinate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Snapshot(_) => StatusCode::BAD_REQUEST,
            AppError::NoSession => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
