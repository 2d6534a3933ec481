use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A customer review. Reviews enter the system unapproved and only become
/// publicly visible after explicit admin approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub review_text: String,
    pub rating: i32,
    pub service_type: Option<String>,
    pub is_approved: bool,
    pub created_at: NaiveDateTime,
    pub approved_at: Option<NaiveDateTime>,
}

/// Submission payload. Reviews are always created unapproved, whatever the
/// client sends; required fields are enforced by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<i32>,
    pub service_type: Option<String>,
}
