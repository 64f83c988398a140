use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub email: String,
  /// Plain text, hashed before storage
  pub password: String,
  pub first_name: Option<String>,
}

/// Response after successful user registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub first_name: Option<String>,
  /// Bearer token for immediate use
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Registers a user and signs them in
  ///
  /// # Arguments
  /// * `command` - The registration command containing user details
  ///
  /// # Returns
  /// A `RegisterUserResponse` containing the new user's details and session token
  ///
  /// # Errors
  /// Returns `AuthError` if registration fails (e.g., email already exists, validation errors)
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let (user, session, session_token) = self
      .auth_service
      .register(email, password, command.first_name)
      .await?;

    Ok(RegisterUserResponse {
      user_id: user.id,
      email: user.email,
      first_name: user.first_name,
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
