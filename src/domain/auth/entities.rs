use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity; the identity every project, task and notification refers to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  /// Primary email address (unique, lower-cased)
  pub email: String,
  pub first_name: Option<String>,
  /// Argon2id PHC string
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(email: String, password_hash: String, first_name: Option<String>) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      email,
      first_name: first_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty()),
      password_hash,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn from_db(
    id: Uuid,
    email: String,
    first_name: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      first_name,
      password_hash,
      created_at,
      updated_at,
    }
  }

  /// First name when known, email otherwise
  pub fn display_name(&self) -> &str {
    self.first_name.as_deref().unwrap_or(&self.email)
  }
}

/// Session entity representing a signed-in client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  /// SHA-256 hash of the bearer token
  pub token_hash: String,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  pub fn with_duration(user_id: Uuid, token_hash: String, duration: Duration) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      expires_at: now + duration,
      created_at: now,
    }
  }

  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      token_hash,
      expires_at,
      created_at,
    }
  }

  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}
