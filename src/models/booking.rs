use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A customer repair request. `confirmed_at` is refreshed on every admin
/// update, not only the first confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub repair_type: String,
    pub address: String,
    pub problem_description: Option<String>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub confirmed_at: Option<NaiveDateTime>,
    pub service_date: Option<NaiveDateTime>,
    pub service_time: Option<String>,
    pub notes: Option<String>,
}

/// Customer-facing submission payload. Required-field validation is
/// delegated to the store's NOT NULL constraints, so every field arrives
/// optional and a missing one surfaces as a write error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub repair_type: Option<String>,
    pub address: Option<String>,
    pub problem_description: Option<String>,
}

/// Admin update payload. No merge semantics: the supplied values overwrite
/// the stored ones unconditionally, so a null here nulls the stored field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub status: Option<BookingStatus>,
    pub service_date: Option<NaiveDateTime>,
    pub service_time: Option<String>,
    pub notes: Option<String>,
}

/// Free-assignment status field. No transition graph is enforced: an admin
/// update may move a booking from any status to any other, including
/// regressions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "CONFIRMED" => BookingStatus::Confirmed,
            "COMPLETED" => BookingStatus::Completed,
            "CANCELLED" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}
