use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::assistant::AssistantError;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::notification::NotificationError;
use crate::domain::project::ProjectError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Field-level validation failures (400 Bad Request)
  InvalidFields(String, serde_json::Value),

  /// Authentication error (401 Unauthorized or 409 Conflict)
  Auth(AuthErrorKind),

  /// Caller lacks the role required (403 Forbidden)
  Forbidden(String),

  /// Missing or invisible resource (404 Not Found)
  NotFound(String),

  /// Request conflicts with current state (409 Conflict)
  Conflict(String),

  /// Upstream provider throttled us (429 Too Many Requests)
  RateLimited,

  /// Chat provider failure (502 Bad Gateway)
  Upstream(String),

  /// Feature not configured (503 Service Unavailable)
  Unavailable(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug)]
pub enum AuthErrorKind {
  /// Invalid credentials (401)
  InvalidCredentials,

  /// Session expired or invalid (401)
  InvalidSession,

  /// Invalid token format (401)
  InvalidToken,

  /// Email already exists (409)
  EmailAlreadyExists,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) | ApiError::InvalidFields(msg, _) => {
        write!(f, "Validation error: {}", msg)
      }
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::RateLimited => write!(f, "Rate limited"),
      ApiError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
      ApiError::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::InvalidFields(..) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials
        | AuthErrorKind::InvalidSession
        | AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
      },
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
      ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message, details) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone(), None),
      ApiError::InvalidFields(msg, fields) => {
        ("validation_error", msg.clone(), Some(fields.clone()))
      }
      ApiError::Auth(kind) => {
        let (err_type, msg) = match kind {
          AuthErrorKind::InvalidCredentials => (
            "invalid_credentials",
            "Invalid email or password".to_string(),
          ),
          AuthErrorKind::InvalidSession => {
            ("invalid_session", "Invalid or expired session".to_string())
          }
          AuthErrorKind::InvalidToken => (
            "invalid_token",
            "Invalid or missing authorization token".to_string(),
          ),
          AuthErrorKind::EmailAlreadyExists => (
            "email_already_exists",
            "An account with this email already exists".to_string(),
          ),
        };
        (err_type, msg, None)
      }
      ApiError::Forbidden(msg) => ("forbidden", msg.clone(), None),
      ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
      ApiError::Conflict(msg) => ("conflict", msg.clone(), None),
      ApiError::RateLimited => (
        "rate_limit_exceeded",
        "Too many requests. Please try again later".to_string(),
        None,
      ),
      ApiError::Upstream(msg) => {
        tracing::warn!("Assistant upstream failure: {}", msg);
        (
          "assistant_unavailable",
          "The assistant could not answer right now. Please try again".to_string(),
          None,
        )
      }
      ApiError::Unavailable(msg) => ("service_unavailable", msg.clone(), None),
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
          None,
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

fn from_repository(error: RepositoryError) -> ApiError {
  match error {
    RepositoryError::NotFound => ApiError::NotFound("Record not found".to_string()),
    RepositoryError::DuplicateKey(_) => ApiError::Conflict("Record already exists".to_string()),
    other => ApiError::Internal(other.to_string()),
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::UserNotFound => ApiError::NotFound("User not found".to_string()),
      AuthError::InvalidSession => ApiError::Auth(AuthErrorKind::InvalidSession),
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(RepositoryError::DuplicateKey(_)) => {
        ApiError::Auth(AuthErrorKind::EmailAlreadyExists)
      }
      AuthError::Repository(err) => from_repository(err),
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

impl From<ProjectError> for ApiError {
  fn from(error: ProjectError) -> Self {
    let message = error.to_string();
    match error {
      ProjectError::ProjectNotFound
      | ProjectError::TaskNotFound
      | ProjectError::ObjectiveNotFound
      | ProjectError::MajorItemNotFound
      | ProjectError::CostNotFound => ApiError::NotFound(message),
      ProjectError::NotLeader | ProjectError::NotMember | ProjectError::NotAssignee => {
        ApiError::Forbidden(message)
      }
      ProjectError::AlreadyOwner
      | ProjectError::AlreadyMember
      | ProjectError::AlreadySupervisor
      | ProjectError::JoinRequestPending
      | ProjectError::TasksIncomplete => ApiError::Conflict(message),
      ProjectError::Validation(err) => ApiError::Validation(err.to_string()),
      ProjectError::ValueObject(err) => ApiError::Validation(err.to_string()),
      ProjectError::Repository(err) => from_repository(err),
    }
  }
}

impl From<NotificationError> for ApiError {
  fn from(error: NotificationError) -> Self {
    match error {
      NotificationError::NotFound => ApiError::NotFound("Notification not found".to_string()),
      NotificationError::InvalidKind(kind) => {
        ApiError::Internal(format!("Invalid notification kind: {}", kind))
      }
      NotificationError::Repository(err) => from_repository(err),
      NotificationError::Directory(err) => ApiError::from(err),
    }
  }
}

impl From<AssistantError> for ApiError {
  fn from(error: AssistantError) -> Self {
    match error {
      AssistantError::NotConfigured => ApiError::Unavailable(error.to_string()),
      AssistantError::EmptyMessage | AssistantError::MessageTooLong { .. } => {
        ApiError::Validation(error.to_string())
      }
      AssistantError::RateLimited => ApiError::RateLimited,
      AssistantError::Timeout(_) | AssistantError::Upstream(_) => {
        ApiError::Upstream(error.to_string())
      }
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut fields = serde_json::Map::new();
    let mut messages = Vec::new();

    for (field, errors) in errors.field_errors() {
      let field_messages: Vec<String> = errors
        .iter()
        .map(|error| {
          error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid field: {}", field))
        })
        .collect();
      messages.extend(field_messages.iter().cloned());
      fields.insert(field.to_string(), serde_json::json!(field_messages));
    }
    messages.sort();

    ApiError::InvalidFields(messages.join(", "), serde_json::Value::Object(fields))
  }
}
