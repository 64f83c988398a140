use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub first_name: Option<String>,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Authenticates a user and opens a new session
  ///
  /// # Arguments
  /// * `command` - The login command containing credentials
  ///
  /// # Returns
  /// A `LoginUserResponse` with the session token and its expiry
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for unknown accounts, wrong
  /// passwords and malformed input alike
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email).map_err(|_| AuthError::InvalidCredentials)?;
    let password = Password::new(command.password).map_err(|_| AuthError::InvalidCredentials)?;

    let (user, session, session_token) = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      user_id: user.id,
      email: user.email,
      first_name: user.first_name,
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
