use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::MessageChannel;

/// WhatsApp Business Cloud API channel. The HTTP client carries a hard
/// timeout so a slow API can never stall the request that triggered the
/// notification.
pub struct WhatsAppCloudChannel {
    phone_number_id: String,
    access_token: String,
    client: reqwest::Client,
}

impl WhatsAppCloudChannel {
    pub fn new(phone_number_id: String, access_token: String) -> Self {
        Self {
            phone_number_id,
            access_token,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl MessageChannel for WhatsAppCloudChannel {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let url = format!(
            "https://graph.facebook.com/v17.0/{}/messages",
            self.phone_number_id
        );

        self.client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({
                "messaging_product": "whatsapp",
                "to": to,
                "type": "text",
                "text": { "body": body },
            }))
            .send()
            .await
            .context("failed to send WhatsApp message")?
            .error_for_status()
            .context("WhatsApp API returned error")?;

        Ok(())
    }
}
