use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CurrentUserResponse, LoginRequest, RegisterRequest, SessionResponse, SuccessResponse},
  errors::{ApiError, AuthErrorKind},
  handlers::get_user,
};
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, LogoutUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};

/// Extract session token from Authorization header
fn extract_session_token(req: &HttpRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// POST /api/v1/auth/register
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    email: request.email,
    password: request.password,
    first_name: request.first_name,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(SessionResponse {
    user_id: response.user_id,
    email: response.email,
    first_name: response.first_name,
    session_token: response.session_token,
    expires_at: response.expires_at,
  }))
}

/// POST /api/v1/auth/login
///
/// Malformed input is reported as invalid credentials so the endpoint does not
/// reveal which part was wrong.
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  if request.validate().is_err() {
    return Err(ApiError::Auth(AuthErrorKind::InvalidCredentials));
  }

  let request = request.into_inner();
  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(SessionResponse {
    user_id: response.user_id,
    email: response.email,
    first_name: response.first_name,
    session_token: response.session_token,
    expires_at: response.expires_at,
  }))
}

/// POST /api/v1/auth/logout
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  use_case.execute(session_token).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Successfully logged out".to_string(),
  }))
}

/// GET /api/v1/auth/me
pub async fn get_current_user_handler(http_req: HttpRequest) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  Ok(HttpResponse::Ok().json(CurrentUserResponse {
    user_id: user.id,
    email: user.email,
    first_name: user.first_name,
    created_at: user.created_at,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_session_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_http_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_session_token_missing() {
    let req = TestRequest::default().to_http_request();
    assert!(extract_session_token(&req).is_err());
  }

  #[test]
  fn test_extract_session_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "InvalidFormat token"))
      .to_http_request();
    assert!(extract_session_token(&req).is_err());
  }
}
