pub mod admin;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod gallery;
pub mod health;
pub mod reviews;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// The flattened error contract: whatever went wrong, the client sees a 400
/// with `{success: false, message}`.
pub(crate) fn error_response(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "success": false, "message": message.into() })),
    )
        .into_response()
}
