use chrono::Duration;
use std::sync::Arc;

use super::entities::{Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionRepository, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Session lifetime used when nothing is configured
const DEFAULT_SESSION_DURATION_HOURS: i64 = 24 * 7;

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_duration: Duration,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_duration: Duration::hours(DEFAULT_SESSION_DURATION_HOURS),
    }
  }
}

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      config,
    }
  }

  /// Registers a new user and signs them in
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if email is already registered
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    first_name: Option<String>,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;
    let user = User::new(email.into_inner(), password_hash.into_inner(), first_name);

    // A concurrent registration can still win the unique constraint
    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    let (session, token) = self.open_session(&created_user).await?;

    tracing::info!(user_id = %created_user.id, "User registered");

    Ok((created_user, session, token))
  }

  /// Authenticates a user and creates a new session
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email or a wrong password
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let password_hash = PasswordHash::from_hash(&user.password_hash)?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      tracing::debug!(user_id = %user.id, "Password verification failed");
      return Err(AuthError::InvalidCredentials);
    }

    let (session, token) = self.open_session(&user).await?;

    Ok((user, session, token))
  }

  /// Logs out a user by invalidating their session token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if session not found
  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await?;

    Ok(())
  }

  /// Validates a session token and returns the associated user
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if session is invalid or expired
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::InvalidSession)
  }

  /// User directory lookup
  pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    self.user_repo.find_by_email(email).await
  }

  async fn open_session(&self, user: &User) -> Result<(Session, SessionToken), AuthError> {
    let token = SessionToken::generate();
    let session = Session::with_duration(
      user.id,
      token.hash().into_inner(),
      self.config.session_duration,
    );
    let session = self.session_repo.create(session).await?;

    Ok((session, token))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::testutil::{InMemorySessionRepository, InMemoryUserRepository};
  use crate::infrastructure::security::Argon2PasswordHasher;

  struct Fixture {
    service: AuthService,
    sessions: Arc<InMemorySessionRepository>,
  }

  fn fixture(config: AuthServiceConfig) -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let service = AuthService::new(
      users,
      sessions.clone(),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      config,
    );
    Fixture { service, sessions }
  }

  fn email(s: &str) -> Email {
    Email::new(s).unwrap()
  }

  fn password(s: &str) -> Password {
    Password::new(s).unwrap()
  }

  #[tokio::test]
  async fn test_register_then_validate_session() {
    let f = fixture(AuthServiceConfig::default());

    let (user, _, token) = f
      .service
      .register(email("Lead@X.io"), password("password123"), Some("Lan".into()))
      .await
      .unwrap();

    assert_eq!(user.email, "lead@x.io");
    let resolved = f.service.validate_session(token).await.unwrap();
    assert_eq!(resolved.id, user.id);
  }

  #[tokio::test]
  async fn test_register_rejects_duplicate_email() {
    let f = fixture(AuthServiceConfig::default());
    f.service
      .register(email("a@x.io"), password("password123"), None)
      .await
      .unwrap();

    let err = f
      .service
      .register(email("A@x.io"), password("password456"), None)
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::EmailAlreadyExists));
  }

  #[tokio::test]
  async fn test_login_checks_password() {
    let f = fixture(AuthServiceConfig::default());
    f.service
      .register(email("a@x.io"), password("password123"), None)
      .await
      .unwrap();

    let err = f
      .service
      .login(email("a@x.io"), password("wrong-password"))
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    let err = f
      .service
      .login(email("nobody@x.io"), password("password123"))
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    assert!(
      f.service
        .login(email("a@x.io"), password("password123"))
        .await
        .is_ok()
    );
  }

  #[tokio::test]
  async fn test_logout_invalidates_token() {
    let f = fixture(AuthServiceConfig::default());
    let (_, _, token) = f
      .service
      .register(email("a@x.io"), password("password123"), None)
      .await
      .unwrap();

    f.service.logout(token.clone()).await.unwrap();

    let err = f.service.validate_session(token.clone()).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidSession));
    let err = f.service.logout(token).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidSession));
  }

  #[tokio::test]
  async fn test_expired_session_is_deleted() {
    let f = fixture(AuthServiceConfig {
      session_duration: Duration::seconds(-1),
    });
    let (_, _, token) = f
      .service
      .register(email("a@x.io"), password("password123"), None)
      .await
      .unwrap();
    assert_eq!(f.sessions.len(), 1);

    let err = f.service.validate_session(token).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidSession));
    assert_eq!(f.sessions.len(), 0);
  }
}
