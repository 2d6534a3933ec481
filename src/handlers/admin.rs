use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::error_response;
use crate::errors::AppError;
use crate::models::{Booking, BookingUpdate, GalleryImage, GalleryImageUpdate, Review};
use crate::services::{booking, gallery, review};
use crate::state::AppState;

// ── Booking Management ──

// GET /api/admin/bookings
pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(booking::list_all(&state)?))
}

// GET /api/admin/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(booking::lookup(&state, id)?))
}

// PUT /api/admin/bookings/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<BookingUpdate>,
) -> Response {
    match booking::apply_admin_update(&state, id, &body).await {
        Ok(updated) => Json(serde_json::json!({
            "success": true,
            "message": "Booking updated and customer notified",
            "booking": updated,
        }))
        .into_response(),
        Err(e) => error_response(format!("Error updating booking: {e}")),
    }
}

// DELETE /api/admin/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    match booking::delete(&state, id) {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Booking deleted successfully",
        }))
        .into_response(),
        Err(_) => error_response("Error deleting booking"),
    }
}

// GET /api/admin/bookings/status/:status
pub async fn get_bookings_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(booking::list_by_status(&state, &status)?))
}

// ── Review Management ──

// GET /api/admin/reviews
pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(review::list_approved(&state)?))
}

// GET /api/admin/reviews/pending
pub async fn get_pending_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(review::list_pending(&state)?))
}

// PUT /api/admin/reviews/:id/approve
pub async fn approve_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    match review::approve(&state, id) {
        Ok(approved) => Json(serde_json::json!({
            "success": true,
            "message": "Review approved",
            "review": approved,
        }))
        .into_response(),
        Err(_) => error_response("Error approving review"),
    }
}

// PUT /api/admin/reviews/:id/reject
pub async fn reject_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    match review::reject(&state, id) {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Review rejected",
        }))
        .into_response(),
        Err(_) => error_response("Error rejecting review"),
    }
}

// DELETE /api/admin/reviews/:id
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    match review::delete(&state, id) {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Review deleted",
        }))
        .into_response(),
        Err(_) => error_response("Error deleting review"),
    }
}

// ── Gallery Management ──

// POST /api/admin/gallery/upload
pub async fn upload_gallery_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let form = match super::gallery::read_upload_form(multipart).await {
        Ok(form) => form,
        Err(message) => return error_response(format!("Error uploading image: {message}")),
    };

    match gallery::upload(
        &state,
        &form.service_type,
        form.image_type,
        form.description,
        &form.file_name,
        &form.data,
    )
    .await
    {
        Ok(image) => Json(serde_json::json!({
            "success": true,
            "message": "Image uploaded successfully",
            "image": image,
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "gallery upload failed");
            error_response("Error uploading image")
        }
    }
}

// GET /api/admin/gallery
pub async fn get_gallery_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GalleryImage>>, AppError> {
    Ok(Json(gallery::list_all(&state)?))
}

// PUT /api/admin/gallery/:id
pub async fn update_gallery_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<GalleryImageUpdate>,
) -> Response {
    match gallery::update(&state, id, &body) {
        Ok(updated) => Json(serde_json::json!({
            "success": true,
            "message": "Image updated successfully",
            "image": updated,
        }))
        .into_response(),
        Err(_) => error_response("Error updating image"),
    }
}

// DELETE /api/admin/gallery/:id
pub async fn delete_gallery_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    match gallery::delete(&state, id) {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Image deleted successfully",
        }))
        .into_response(),
        Err(_) => error_response("Error deleting image"),
    }
}

// ── Dashboard Statistics ──

// GET /api/admin/dashboard/stats
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    total_bookings: i64,
    pending_bookings: i64,
    completed_bookings: i64,
    pending_reviews: i64,
    average_rating: f64,
}

pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, AppError> {
    let counts = booking::counts(&state)?;
    let pending_reviews = {
        let db = state.db.lock().unwrap();
        crate::db::queries::count_pending_reviews(&db)?
    };
    let average_rating = review::average_rating(&state)?;

    Ok(Json(DashboardStats {
        total_bookings: counts.total,
        pending_bookings: counts.pending,
        completed_bookings: counts.completed,
        pending_reviews,
        average_rating,
    }))
}
