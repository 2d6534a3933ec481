pub mod cloud;
pub mod console;

use async_trait::async_trait;

/// Outbound message transport. Implementations deliver a rendered message
/// to a phone number; the dispatcher decides what to do with failures.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()>;
}
