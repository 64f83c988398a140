use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash};

/// Repository trait for user persistence; doubles as the user directory
/// that resolves invitation emails to accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, user: User) -> Result<User, AuthError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Looks up every user whose email is in `emails`; unknown addresses are skipped
  async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<User>, AuthError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
  async fn create(&self, session: Session) -> Result<Session, AuthError>;

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}
