//! Pure WhatsApp message formatting: phone normalization and the richer
//! templated messages used by operator tooling. No side effects here.

/// Normalize a phone number for the WhatsApp API: strip everything that is
/// not a digit, then prefix the Indian country code when the number is a
/// bare 10-digit subscriber number. Numbers already carrying the country
/// code pass through unchanged.
pub fn normalize_phone_number(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if cleaned.len() == 10 {
        format!("91{cleaned}")
    } else {
        cleaned
    }
}

/// Format an optional service date the way it is shown to customers.
pub fn format_service_date(date: Option<&chrono::NaiveDateTime>) -> String {
    date.map(|d| d.format("%d-%m-%Y").to_string())
        .unwrap_or_default()
}

pub fn booking_request_message(
    name: &str,
    phone: &str,
    service: &str,
    address: &str,
    issue: &str,
) -> String {
    format!(
        "📋 *New Booking Request*\n\n\
         🧑 Name: {name}\n\
         📱 Phone: {phone}\n\
         🔧 Service: {service}\n\
         📍 Address: {address}\n\
         📝 Issue: {issue}\n\n\
         Please confirm service date and time.\n\
         Thank you!"
    )
}

pub fn service_confirmation_message(
    customer_name: &str,
    service_date: &str,
    service_time: &str,
    service_type: &str,
    app_name: &str,
) -> String {
    format!(
        "✅ *Service Confirmed*\n\n\
         Hello {customer_name},\n\n\
         Your appointment is confirmed!\n\
         📅 Date: {service_date}\n\
         ⏰ Time: {service_time}\n\
         🔧 Service: {service_type}\n\n\
         Our technician will arrive at your address.\n\
         Thank you for choosing {app_name}!"
    )
}

pub fn service_completion_message(customer_name: &str, app_name: &str) -> String {
    format!(
        "🎉 *Service Complete*\n\n\
         Hello {customer_name},\n\n\
         Your service has been completed!\n\
         We hope you're satisfied with our service.\n\n\
         Please share your feedback and rate us on our website.\n\
         Thank you for choosing {app_name}!"
    )
}

pub fn reminder_message(customer_name: &str, service_date: &str, service_time: &str) -> String {
    format!(
        "⏰ *Service Reminder*\n\n\
         Hello {customer_name},\n\n\
         This is a reminder for your scheduled service:\n\
         📅 Date: {service_date}\n\
         ⏰ Time: {service_time}\n\n\
         Our technician will arrive at your address.\n\
         Please ensure someone is available."
    )
}
