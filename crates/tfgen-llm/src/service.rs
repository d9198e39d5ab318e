//! Completion service trait

use async_trait::async_trait;
use tfgen_core::Result;

/// Anything that turns a system instruction and a user message into text
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Return the model's reply; transport and status failures are `RemoteCall` errors
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
