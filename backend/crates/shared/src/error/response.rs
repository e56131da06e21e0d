//! HTTP rendering of [`AppError`] (feature `axum`)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::app_error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // `message` is what the storefront script displays
        let body = serde_json::json!({
            "message": self.message(),
            "status": self.status_code(),
            "title": self.kind().as_str(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
