use anyhow::{Context, Result};
use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatRole, MessageType};
use tracing::warn;

use super::{Message, ModelClient, Role};

/// Gemini model client using the llm crate
pub struct GeminiClient {
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the specified model
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable not set")?;
        Ok(Self {
            model: model.into(),
            api_key,
        })
    }

    /// Create a client using Gemini 1.5 Flash
    pub fn flash() -> Result<Self> {
        Self::new("gemini-1.5-flash")
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn chat(&self, system: &str, transcript: &[Message]) -> Result<String> {
        // NOTE: We rebuild the LLM client on each call because the llm crate
        // fixes configuration at build time.
        let llm = LLMBuilder::new()
            .backend(LLMBackend::Google)
            .api_key(&self.api_key)
            .model(&self.model)
            .system(system)
            .max_tokens(8192)
            .build()
            .context("failed to build LLM client")?;

        let chat_messages: Vec<ChatMessage> = transcript
            .iter()
            .map(|msg| ChatMessage {
                role: match msg.role {
                    Role::User => ChatRole::User,
                    Role::Assistant => ChatRole::Assistant,
                },
                message_type: MessageType::Text,
                content: msg.content.clone(),
            })
            .collect();

        let response = llm
            .chat(&chat_messages)
            .await
            .context("failed to call Gemini API")?;

        let content = response.text().unwrap_or_else(|| {
            warn!("Gemini API returned empty or missing response text");
            String::new()
        });

        Ok(content)
    }
}
