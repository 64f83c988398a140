use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Response containing current user information
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub first_name: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Use case for getting the current authenticated user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Resolves a session token to its user
  ///
  /// # Arguments
  /// * `session_token` - The bearer token sent by the client
  ///
  /// # Returns
  /// A `GetCurrentUserResponse` containing the user's details
  ///
  /// # Errors
  /// Returns `AuthError` if the session is invalid or expired
  pub async fn execute(&self, session_token: String) -> Result<GetCurrentUserResponse, AuthError> {
    let token = SessionToken::from_string(session_token)?;
    let user = self.auth_service.validate_session(token).await?;

    Ok(GetCurrentUserResponse {
      user_id: user.id,
      email: user.email,
      first_name: user.first_name,
      created_at: user.created_at,
    })
  }
}
