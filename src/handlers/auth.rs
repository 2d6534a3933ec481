use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::error_response;
use crate::errors::AppError;
use crate::models::NewUser;
use crate::services::auth;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    let (Some(email), Some(password)) = (body.email.as_deref(), body.password.as_deref()) else {
        return error_response("Invalid email or password");
    };

    match auth::authenticate(&state, email, password) {
        Ok(Some(user)) => Json(serde_json::json!({
            "success": true,
            "message": "Login successful",
            "user": user,
        }))
        .into_response(),
        Ok(None) => error_response("Invalid email or password"),
        Err(e) => error_response(format!("Error during login: {e}")),
    }
}

// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewUser>,
) -> Response {
    match auth::register(&state, &body) {
        Ok(user) => Json(serde_json::json!({
            "success": true,
            "message": "Registration successful",
            "user": user,
        }))
        .into_response(),
        Err(AppError::Validation(message)) => error_response(message),
        Err(e) => error_response(format!("Error during registration: {e}")),
    }
}
