use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
  #[error("The assistant is not configured")]
  NotConfigured,

  #[error("Message is required")]
  EmptyMessage,

  #[error("Message must be at most {max} characters")]
  MessageTooLong { max: usize },

  #[error("Assistant request timed out after {0}s")]
  Timeout(u64),

  #[error("Assistant is rate limited upstream")]
  RateLimited,

  #[error("Assistant upstream error: {0}")]
  Upstream(String),
}
