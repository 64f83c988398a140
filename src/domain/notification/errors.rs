use thiserror::Error;

use crate::domain::auth::errors::{AuthError, RepositoryError};

#[derive(Debug, Error)]
pub enum NotificationError {
  #[error("Notification not found")]
  NotFound,

  #[error("Invalid notification kind: {0}")]
  InvalidKind(String),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("User directory error: {0}")]
  Directory(#[from] AuthError),
}

impl From<sqlx::Error> for NotificationError {
  fn from(error: sqlx::Error) -> Self {
    NotificationError::Repository(RepositoryError::from(error))
  }
}
