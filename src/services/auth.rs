use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{NewUser, User};
use crate::state::AppState;

/// Hash a password as an Argon2id PHC string with a random salt. Stored
/// hashes carry their own parameters, so verification needs no extra state.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash. A malformed hash verifies
/// as false rather than erroring, so login can only succeed or fail.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub fn register(state: &AppState, new: &NewUser) -> Result<User, AppError> {
    let db = state.db.lock().unwrap();

    if let Some(email) = new.email.as_deref() {
        if queries::get_user_by_email(&db, email)?.is_some() {
            return Err(AppError::Validation("Email already registered".to_string()));
        }
    }

    let password_hash = match new.password.as_deref() {
        Some(p) => Some(
            hash_password(p).map_err(|e| AppError::Validation(format!("invalid password: {e}")))?,
        ),
        None => None,
    };

    let id = queries::insert_user(
        &db,
        new.email.as_deref(),
        password_hash.as_deref(),
        new.role,
        new.full_name.as_deref(),
        new.phone_number.as_deref(),
        &Utc::now().naive_utc(),
    )?;

    queries::get_user_by_id(&db, id)?.ok_or(AppError::NotFound("user"))
}

/// Check credentials and stamp `last_login` on success. Returns `None` for
/// an unknown email or a wrong password; the caller cannot tell which.
pub fn authenticate(state: &AppState, email: &str, password: &str) -> Result<Option<User>, AppError> {
    let db = state.db.lock().unwrap();

    let Some(mut user) = queries::get_user_by_email(&db, email)? else {
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash) {
        return Ok(None);
    }

    let now = Utc::now().naive_utc();
    queries::touch_last_login(&db, user.id, &now)?;
    user.last_login = Some(now);

    Ok(Some(user))
}
