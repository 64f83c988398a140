use std::sync::Arc;

use crate::domain::assistant::{AssistantError, AssistantService, ChatTurn};

#[derive(Debug, Clone)]
pub struct AskAssistantCommand {
  pub message: String,
  /// Earlier turns of the conversation, oldest first
  pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone)]
pub struct AskAssistantResponse {
  pub reply: String,
}

pub struct AskAssistantUseCase {
  assistant_service: Arc<AssistantService>,
}

impl AskAssistantUseCase {
  pub fn new(assistant_service: Arc<AssistantService>) -> Self {
    Self { assistant_service }
  }

  /// Sends one user turn, with prior history, to the configured model
  ///
  /// # Arguments
  /// * `command` - The new message and the conversation so far
  ///
  /// # Returns
  /// An `AskAssistantResponse` with the assistant's reply
  ///
  /// # Errors
  /// Returns `AssistantError` if no client is configured or the upstream call fails
  pub async fn execute(
    &self,
    command: AskAssistantCommand,
  ) -> Result<AskAssistantResponse, AssistantError> {
    let reply = self
      .assistant_service
      .ask(&command.message, &command.history)
      .await?;

    Ok(AskAssistantResponse { reply })
  }
}
