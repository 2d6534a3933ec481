use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error_response;
use crate::errors::AppError;
use crate::models::{NewReview, Review};
use crate::services::review;
use crate::state::AppState;

// POST /api/reviews
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewReview>,
) -> Response {
    match review::create(&state, &body) {
        Ok(created) => Json(serde_json::json!({
            "success": true,
            "message": "Review submitted successfully. Awaiting admin approval.",
            "reviewId": created.id,
        }))
        .into_response(),
        Err(e) => error_response(format!("Error submitting review: {e}")),
    }
}

// GET /api/reviews/approved
pub async fn get_approved_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(review::list_approved(&state)?))
}

// GET /api/reviews/rating
pub async fn get_average_rating(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let average = review::average_rating(&state)?;
    Ok(Json(serde_json::json!({ "averageRating": average })))
}
