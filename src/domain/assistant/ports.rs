use async_trait::async_trait;

use super::entities::ChatMessage;
use super::errors::AssistantError;

/// OpenAI-style chat completion backend
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
  /// Returns the first choice's content, `None` when the reply was empty
  async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, AssistantError>;
}
