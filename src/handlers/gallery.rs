use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error_response;
use crate::errors::AppError;
use crate::models::GalleryImage;
use crate::services::gallery;
use crate::state::AppState;

/// Parsed gallery upload form. `serviceType` and the file part are
/// mandatory; the error string becomes the response message.
pub(crate) struct UploadForm {
    pub file_name: String,
    pub data: Vec<u8>,
    pub service_type: String,
    pub image_type: Option<String>,
    pub description: Option<String>,
}

pub(crate) async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, String> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut service_type: Option<String> = None;
    let mut image_type: Option<String> = None;
    let mut description: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(e.to_string()),
        };

        match field.name().unwrap_or("") {
            "file" => {
                let name = field.file_name().unwrap_or("upload").to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((name, bytes.to_vec())),
                    Err(e) => return Err(e.to_string()),
                }
            }
            "serviceType" => service_type = field.text().await.ok(),
            "imageType" => image_type = field.text().await.ok(),
            "description" => description = field.text().await.ok(),
            _ => {}
        }
    }

    let Some(service_type) = service_type else {
        return Err("serviceType is required".to_string());
    };
    let Some((file_name, data)) = file else {
        return Err("file is required".to_string());
    };

    Ok(UploadForm {
        file_name,
        data,
        service_type,
        image_type,
        description,
    })
}

// POST /api/gallery/upload
//
// Unlike the admin route, this returns the saved record directly rather
// than the `{success, message, image}` envelope.
pub async fn upload_image(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let form = match read_upload_form(multipart).await {
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
        Ok(image) => Json(image).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "gallery upload failed");
            error_response("Error uploading image")
        }
    }
}

// GET /api/gallery
pub async fn get_active_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GalleryImage>>, AppError> {
    Ok(Json(gallery::list_active(&state)?))
}

// GET /api/gallery/service/:service_type
pub async fn get_images_by_service(
    State(state): State<Arc<AppState>>,
    Path(service_type): Path<String>,
) -> Result<Json<Vec<GalleryImage>>, AppError> {
    Ok(Json(gallery::list_by_service(&state, &service_type)?))
}
