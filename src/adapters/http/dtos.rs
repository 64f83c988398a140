use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::project::TaskGroupView;
use crate::domain::assistant::ChatTurn;
use crate::domain::project::{
  ProjectStatus, RoleFilter, StatusFilter, Task, TaskGrouping, TaskSort, TeamMember,
};

// ---- Auth ----

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
  pub first_name: Option<String>,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Session issued after registration or login
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
  pub user_id: Uuid,
  pub email: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name: Option<String>,
  /// Bearer token for the Authorization header
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Response containing current user information
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  pub user_id: Uuid,
  pub email: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name: Option<String>,
  pub created_at: DateTime<Utc>,
}

// ---- Projects ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProjectsQuery {
  pub search: Option<String>,
  #[serde(default)]
  pub status: StatusFilter,
  #[serde(default)]
  pub role: RoleFilter,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectRequest {
  #[validate(length(min = 1, max = 255, message = "Project name must be between 1 and 255 characters"))]
  pub name: String,

  #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
  pub description: Option<String>,

  pub start_date: Option<NaiveDate>,

  pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProjectRequest {
  #[validate(length(min = 1, max = 255, message = "Project name must be between 1 and 255 characters"))]
  pub name: String,

  #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
  pub description: Option<String>,

  pub start_date: NaiveDate,

  pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateObjectiveRequest {
  #[validate(length(min = 1, max = 1000, message = "Objective must be between 1 and 1000 characters"))]
  pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMajorItemRequest {
  #[validate(length(min = 1, max = 255, message = "Major item must be between 1 and 255 characters"))]
  pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCostRequest {
  #[validate(length(min = 1, max = 500, message = "Description must be between 1 and 500 characters"))]
  pub description: String,

  pub amount: Decimal,

  /// `INCOME` or `EXPENSE`
  #[serde(alias = "type")]
  pub kind: String,
}

// ---- Tasks ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
  pub major_item_id: Option<Uuid>,
  #[serde(default)]
  pub sort: TaskSort,
  #[serde(default)]
  pub group_by: TaskGrouping,
}

/// Body for creating or replacing a task
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskRequest {
  pub major_item_id: Uuid,

  #[validate(length(min = 1, max = 500, message = "Minor item must be between 1 and 500 characters"))]
  pub minor_item: String,

  pub deadline: NaiveDate,

  pub main_resp: Option<String>,

  pub sub_resp: Option<String>,

  #[serde(default)]
  pub objective_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskStatusRequest {
  /// Toggles between done and pending when omitted
  #[serde(default)]
  pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskStatusResponse {
  pub task: Task,
  pub project_status: ProjectStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListResponse {
  pub groups: Vec<TaskGroupView>,
  pub total: usize,
}

// ---- Team ----

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinProjectRequest {
  #[validate(length(min = 1, max = 100, message = "Project id is required"))]
  pub project_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequestActionRequest {
  /// `accept` or `reject`
  pub action: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,
}

/// Path of a member or supervisor removal
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMemberPath {
  pub project_id: Uuid,
  pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
  pub members: Vec<TeamMember>,
}

// ---- Notifications ----

#[derive(Debug, Clone, Serialize)]
pub struct MarkAllReadResponse {
  pub updated: u64,
}

// ---- Assistant ----

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
  #[validate(length(min = 1, max = 4000, message = "Message must be between 1 and 4000 characters"))]
  pub message: String,

  #[serde(default)]
  pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
  pub reply: String,
}

// ---- Shared ----

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
