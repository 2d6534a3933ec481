use async_trait::async_trait;

use super::MessageChannel;

/// Development channel: writes the message to the log instead of sending
/// it. Stands in wherever real WhatsApp credentials are not configured.
pub struct ConsoleChannel;

#[async_trait]
impl MessageChannel for ConsoleChannel {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(to = %to, "WhatsApp message (console channel):\n{body}");
        Ok(())
    }
}
