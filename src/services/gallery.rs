use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{GalleryImage, GalleryImageUpdate};
use crate::state::AppState;

/// Places the uploaded file under the configured upload directory and
/// records a gallery row pointing at it. The stored filename is prefixed
/// with a fresh UUID so uploads can never collide.
pub async fn upload(
    state: &AppState,
    service_type: &str,
    image_type: Option<String>,
    description: Option<String>,
    file_name: &str,
    data: &[u8],
) -> Result<GalleryImage, AppError> {
    let dir = Path::new(&state.config.upload_dir);
    tokio::fs::create_dir_all(dir).await?;

    let stored_name = format!("{}_{}", Uuid::new_v4(), file_name);
    tokio::fs::write(dir.join(&stored_name), data).await?;

    let image_url = format!("/uploads/gallery/{stored_name}");

    let db = state.db.lock().unwrap();
    let id = queries::insert_gallery_image(
        &db,
        &image_url,
        service_type,
        image_type.as_deref(),
        description.as_deref(),
        &Utc::now().naive_utc(),
    )?;
    queries::get_gallery_image_by_id(&db, id)?.ok_or(AppError::NotFound("image"))
}

pub fn list_active(state: &AppState) -> Result<Vec<GalleryImage>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_active_gallery_images(&db)?)
}

pub fn list_by_service(state: &AppState, service_type: &str) -> Result<Vec<GalleryImage>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_active_gallery_images_by_service(&db, service_type)?)
}

pub fn list_all(state: &AppState) -> Result<Vec<GalleryImage>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::list_all_gallery_images(&db)?)
}

pub fn update(state: &AppState, id: i64, update: &GalleryImageUpdate) -> Result<GalleryImage, AppError> {
    let db = state.db.lock().unwrap();
    if queries::update_gallery_image(&db, id, update)? == 0 {
        return Err(AppError::NotFound("image"));
    }
    queries::get_gallery_image_by_id(&db, id)?.ok_or(AppError::NotFound("image"))
}

/// Hard delete of the record. The file itself is left in place; inactive
/// records already disappear from public listings via `is_active`.
pub fn delete(state: &AppState, id: i64) -> Result<(), AppError> {
    let db = state.db.lock().unwrap();
    queries::delete_gallery_image(&db, id)?;
    Ok(())
}
