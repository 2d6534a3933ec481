use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::ServiceType;
use crate::state::AppState;

// GET /api/services
pub async fn get_service_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceType>>, AppError> {
    let types = {
        let db = state.db.lock().unwrap();
        queries::list_active_service_types(&db)?
    };
    Ok(Json(types))
}
