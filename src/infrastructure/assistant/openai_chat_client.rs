use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::assistant::{AssistantError, ChatCompletionClient, ChatMessage};
use crate::infrastructure::config::AssistantConfig;

/// Chat client for any OpenAI-compatible completions API (Groq, OpenAI, ...)
#[derive(Clone)]
pub struct OpenAiChatClient {
  client: Client,
  base_url: String,
  api_key: String,
  model: String,
  temperature: f32,
  max_tokens: u32,
  timeout_secs: u64,
}

impl OpenAiChatClient {
  pub fn new(api_key: &str, config: &AssistantConfig) -> Result<Self, AssistantError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| AssistantError::Upstream(e.to_string()))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key: api_key.to_string(),
      model: config.model.clone(),
      temperature: config.temperature,
      max_tokens: config.max_tokens,
      timeout_secs: config.timeout_seconds,
    })
  }

  fn request_body(&self, messages: &[ChatMessage]) -> ChatRequest {
    ChatRequest {
      model: self.model.clone(),
      messages: messages
        .iter()
        .map(|m| Message {
          role: m.role.as_str().to_string(),
          content: m.content.clone(),
        })
        .collect(),
      temperature: self.temperature,
      max_tokens: self.max_tokens,
    }
  }
}

// ---- OpenAI API types ----

#[derive(Serialize)]
struct ChatRequest {
  model: String,
  messages: Vec<Message>,
  temperature: f32,
  max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
  role: String,
  content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
  content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
  error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
  message: String,
}

#[async_trait]
impl ChatCompletionClient for OpenAiChatClient {
  async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, AssistantError> {
    let url = format!("{}/chat/completions", self.base_url);
    let request = self.request_body(messages);

    let response = self
      .client
      .post(&url)
      .header("Authorization", format!("Bearer {}", self.api_key))
      .json(&request)
      .send()
      .await
      .map_err(|e| {
        if e.is_timeout() {
          AssistantError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
          AssistantError::Upstream(format!("Connection failed: {}", e))
        } else {
          AssistantError::Upstream(e.to_string())
        }
      })?;

    let status = response.status();
    if !status.is_success() {
      let status_code = status.as_u16();
      if status_code == 429 {
        return Err(AssistantError::RateLimited);
      }

      let body = response.text().await.unwrap_or_default();
      let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status_code, body));

      return Err(AssistantError::Upstream(message));
    }

    let chat_response: ChatResponse = response
      .json()
      .await
      .map_err(|e| AssistantError::Upstream(format!("Failed to parse chat response: {}", e)))?;

    Ok(
      chat_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content),
    )
  }
}
