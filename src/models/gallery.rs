use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A gallery photo. "Deletion" for public listings is the `is_active` flag;
/// a hard delete is also exposed to admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i64,
    pub image_url: String,
    pub service_type: String,
    pub image_type: Option<String>,
    pub image_description: Option<String>,
    pub is_active: bool,
    pub uploaded_at: NaiveDateTime,
}

/// Admin edit payload. `image_type` and `image_description` overwrite the
/// stored values (null included); an omitted `is_active` means active.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageUpdate {
    pub image_type: Option<String>,
    pub image_description: Option<String>,
    pub is_active: Option<bool>,
}
