use crate::models::Booking;
use crate::services::messaging::MessageChannel;
use crate::services::whatsapp;

/// Operator contact details, resolved once at startup and handed to the
/// dispatcher at construction.
pub struct NotifierConfig {
    pub admin_whatsapp_number: String,
    pub admin_email: String,
    pub app_name: String,
}

/// Renders booking notifications and hands them to the outbound channel.
/// Delivery is best-effort: a failed send is logged and swallowed so it can
/// never fail the booking operation that triggered it.
pub struct Notifier {
    config: NotifierConfig,
    channel: Box<dyn MessageChannel>,
}

impl Notifier {
    pub fn new(config: NotifierConfig, channel: Box<dyn MessageChannel>) -> Self {
        Self { config, channel }
    }

    /// Alert the operator number about a freshly submitted booking.
    pub async fn notify_new_booking(&self, booking: &Booking) {
        let message = format!(
            "New Booking Request!\n\n\
             Name: {}\n\
             Phone: {}\n\
             Service: {}\n\
             Address: {}\n\
             Problem: {}\n\n\
             Please confirm service date and time.",
            booking.customer_name,
            booking.phone_number,
            booking.repair_type,
            booking.address,
            booking.problem_description.as_deref().unwrap_or(""),
        );

        let to = whatsapp::normalize_phone_number(&self.config.admin_whatsapp_number);
        self.deliver(&to, &message).await;
    }

    /// Tell the customer their booking changed. Sent on every admin update,
    /// whatever the new status is.
    pub async fn notify_status_change(&self, booking: &Booking) {
        let message = format!(
            "Hello {},\n\n\
             Your booking status: {}\n\
             Service Date: {}\n\
             Service Time: {}\n\n\
             Thank you for choosing {}!",
            booking.customer_name,
            booking.status.as_str(),
            whatsapp::format_service_date(booking.service_date.as_ref()),
            booking.service_time.as_deref().unwrap_or(""),
            self.config.app_name,
        );

        let to = whatsapp::normalize_phone_number(&booking.phone_number);
        self.deliver(&to, &message).await;
    }

    async fn deliver(&self, to: &str, body: &str) {
        if let Err(e) = self.channel.send(to, body).await {
            tracing::warn!(to = %to, error = %e, "failed to deliver notification");
        }
    }
}
