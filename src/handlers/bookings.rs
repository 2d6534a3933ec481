use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error_response;
use crate::errors::AppError;
use crate::models::{Booking, NewBooking};
use crate::services::booking;
use crate::state::AppState;

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewBooking>,
) -> Response {
    match booking::submit(&state, &body).await {
        Ok(created) => Json(serde_json::json!({
            "success": true,
            "message": "Booking created successfully",
            "bookingId": created.id,
        }))
        .into_response(),
        Err(e) => error_response(format!("Error creating booking: {e}")),
    }
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(booking::lookup(&state, id)?))
}

// GET /api/bookings/phone/:phone_number
pub async fn get_bookings_by_phone(
    State(state): State<Arc<AppState>>,
    Path(phone_number): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(booking::list_by_phone(&state, &phone_number)?))
}
