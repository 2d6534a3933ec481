use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub app_name: String,
    pub admin_whatsapp_number: String,
    pub admin_email: String,
    pub upload_dir: String,
    pub whatsapp_access_token: String,
    pub whatsapp_phone_number_id: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "repairdesk.db".to_string()),
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "RepairDesk".to_string()),
            admin_whatsapp_number: env::var("ADMIN_WHATSAPP_NUMBER").unwrap_or_default(),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_default(),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads/gallery".to_string()),
            whatsapp_access_token: env::var("WHATSAPP_ACCESS_TOKEN").unwrap_or_default(),
            whatsapp_phone_number_id: env::var("WHATSAPP_PHONE_NUMBER_ID").unwrap_or_default(),
        }
    }
}
