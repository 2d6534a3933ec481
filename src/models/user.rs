use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An admin account. `password_hash` holds an Argon2id PHC string and is
/// never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

/// Registration payload. Required fields are enforced by the store; the
/// plaintext password is hashed before it reaches it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    DeveloperAdmin,
    ClientAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::DeveloperAdmin => "DEVELOPER_ADMIN",
            UserRole::ClientAdmin => "CLIENT_ADMIN",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "DEVELOPER_ADMIN" => UserRole::DeveloperAdmin,
            _ => UserRole::ClientAdmin,
        }
    }
}
