use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
  System,
  User,
  Assistant,
}

impl ChatRole {
  pub fn as_str(&self) -> &'static str {
    match self {
      ChatRole::System => "system",
      ChatRole::User => "user",
      ChatRole::Assistant => "assistant",
    }
  }

  /// Client-supplied roles: `assistant` stays, anything else is the user
  pub fn from_client(role: &str) -> Self {
    if role.eq_ignore_ascii_case("assistant") {
      ChatRole::Assistant
    } else {
      ChatRole::User
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: ChatRole,
  pub content: String,
}

impl ChatMessage {
  pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
    Self {
      role,
      content: content.into(),
    }
  }
}

/// One prior turn as the client sent it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatTurn {
  pub role: String,
  pub content: String,
}
