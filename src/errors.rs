use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Internal error taxonomy. Most admin endpoints flatten everything onto a
/// `{success: false, message}` body with a 400 status; only explicit
/// fetch-by-id misses answer 404.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("messaging error: {0}")]
    Messaging(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Validation(_)
            | AppError::Messaging(_) => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({ "success": false, "message": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
