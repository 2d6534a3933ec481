use std::sync::Arc;

use chrono::Utc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingUpdate, NewBooking};
use crate::state::AppState;

/// Persists a new booking request in PENDING state, then alerts the
/// operator channel. The notification is best-effort: its failure is logged
/// inside the notifier and never rolls back or fails the write.
pub async fn submit(state: &Arc<AppState>, new: &NewBooking) -> Result<Booking, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        let id = queries::insert_booking(&db, new, &Utc::now().naive_utc())?;
        queries::get_booking_by_id(&db, id)?.ok_or(AppError::NotFound("booking"))?
    };

    state.notifier.notify_new_booking(&booking).await;

    Ok(booking)
}

pub fn lookup(state: &AppState, id: i64) -> Result<Booking, AppError> {
    let db = state.db.lock().unwrap();
    queries::get_booking_by_id(&db, id)?.ok_or(AppError::NotFound("booking"))
}

pub fn list_all(state: &AppState) -> Result<Vec<Booking>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_bookings(&db)?)
}

pub fn list_by_phone(state: &AppState, phone: &str) -> Result<Vec<Booking>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_bookings_by_phone(&db, phone)?)
}

pub fn list_by_status(state: &AppState, status: &str) -> Result<Vec<Booking>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_bookings_by_status(&db, status)?)
}

/// Overwrites the admin-owned scheduling fields and notifies the customer.
/// `confirmed_at` is stamped with the current time on every call, not only
/// the first confirmation. No notification is attempted when the id does
/// not resolve.
pub async fn apply_admin_update(
    state: &Arc<AppState>,
    id: i64,
    update: &BookingUpdate,
) -> Result<Booking, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        if queries::get_booking_by_id(&db, id)?.is_none() {
            return Err(AppError::NotFound("booking"));
        }

        queries::update_booking(&db, id, update, &Utc::now().naive_utc())?;
        queries::get_booking_by_id(&db, id)?.ok_or(AppError::NotFound("booking"))?
    };

    state.notifier.notify_status_change(&booking).await;

    Ok(booking)
}

/// Hard delete. Deleting an id that does not exist is a no-op success.
pub fn delete(state: &AppState, id: i64) -> Result<(), AppError> {
    let db = state.db.lock().unwrap();
    queries::delete_booking(&db, id)?;
    Ok(())
}

pub struct BookingCounts {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
}

pub fn counts(state: &AppState) -> Result<BookingCounts, AppError> {
    let db = state.db.lock().unwrap();
    Ok(BookingCounts {
        total: queries::count_bookings(&db)?,
        pending: queries::count_bookings_by_status(&db, "PENDING")?,
        completed: queries::count_bookings_by_status(&db, "COMPLETED")?,
    })
}
