pub mod assistant;
pub mod auth;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod team;

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::{auth::entities::User, project::Actor},
};
use actix_web::{HttpMessage, HttpRequest};

/// Extract authenticated user from request extensions
pub fn get_user(req: &HttpRequest) -> Result<User, ApiError> {
  let user = req.extensions().get::<User>().cloned();

  if user.is_none() {
    tracing::warn!(
      "get_user: User not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or(ApiError::Auth(AuthErrorKind::InvalidSession))
}

/// The authenticated user as seen by project operations
pub fn get_actor(req: &HttpRequest) -> Result<Actor, ApiError> {
  get_user(req).map(|user| Actor::from(&user))
}
