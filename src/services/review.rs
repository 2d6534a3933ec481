use chrono::Utc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{NewReview, Review};
use crate::state::AppState;

/// Reviews always enter the system unapproved, whatever the client sent.
pub fn create(state: &AppState, new: &NewReview) -> Result<Review, AppError> {
    let db = state.db.lock().unwrap();
    let id = queries::insert_review(&db, new, &Utc::now().naive_utc())?;
    queries::get_review_by_id(&db, id)?.ok_or(AppError::NotFound("review"))
}

pub fn list_approved(state: &AppState) -> Result<Vec<Review>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_reviews_by_approval(&db, true)?)
}

pub fn list_pending(state: &AppState) -> Result<Vec<Review>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_reviews_by_approval(&db, false)?)
}

pub fn approve(state: &AppState, id: i64) -> Result<Review, AppError> {
    let db = state.db.lock().unwrap();
    if queries::approve_review(&db, id, &Utc::now().naive_utc())? == 0 {
        return Err(AppError::NotFound("review"));
    }
    queries::get_review_by_id(&db, id)?.ok_or(AppError::NotFound("review"))
}

/// Clears approval without touching the earlier `approved_at` stamp.
pub fn reject(state: &AppState, id: i64) -> Result<(), AppError> {
    let db = state.db.lock().unwrap();
    if queries::reject_review(&db, id)? == 0 {
        return Err(AppError::NotFound("review"));
    }
    Ok(())
}

/// Hard delete, idempotent like booking deletion.
pub fn delete(state: &AppState, id: i64) -> Result<(), AppError> {
    let db = state.db.lock().unwrap();
    queries::delete_review(&db, id)?;
    Ok(())
}

/// Average over approved reviews only; pending reviews never count.
pub fn average_rating(state: &AppState) -> Result<f64, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::average_approved_rating(&db)?)
}
