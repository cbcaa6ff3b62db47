use anyhow::Result;
use async_trait::async_trait;

use super::Message;

/// Trait for the model collaborator.
///
/// The interaction loop owns the transcript and passes it in full on every
/// call, so tests can drive the loop with a scripted implementation and no
/// network dependency.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the system prompt and transcript to the model; returns the raw
    /// text of the model's reply.
    async fn chat(&self, system: &str, transcript: &[Message]) -> Result<String>;

    /// Get the client name
    fn name(&self) -> &str;
}
