use thiserror::Error;

use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum ProjectError {
  /// Also returned for projects the caller may not see
  #[error("Project not found")]
  ProjectNotFound,

  #[error("Task not found")]
  TaskNotFound,

  #[error("Objective not found")]
  ObjectiveNotFound,

  #[error("Major item not found")]
  MajorItemNotFound,

  #[error("Cost not found")]
  CostNotFound,

  #[error("Only the project leader can perform this action")]
  NotLeader,

  #[error("Only project members can perform this action")]
  NotMember,

  #[error("Only the leader or the person responsible can change this task")]
  NotAssignee,

  #[error("You are the leader of this project")]
  AlreadyOwner,

  #[error("User is already a member of this project")]
  AlreadyMember,

  #[error("User is already a supervisor of this project")]
  AlreadySupervisor,

  #[error("A join request for this project is already pending")]
  JoinRequestPending,

  #[error("All tasks must be done before the project can be finished")]
  TasksIncomplete,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("{field} is required")]
  FieldRequired { field: String },

  #[error("{field} must be at most {max} characters")]
  FieldTooLong { field: String, max: usize },

  #[error("End date must not be before start date")]
  EndBeforeStart,

  #[error("Amount must be greater than zero")]
  NonPositiveAmount,

  #[error("Amount must have at most {max} decimal places")]
  AmountTooPrecise { max: u32 },

  #[error("Amount must be less than {limit}")]
  AmountTooLarge { limit: rust_decimal::Decimal },

  #[error("Major item does not belong to this project")]
  ForeignMajorItem,

  #[error("Objective {0} does not belong to this project")]
  ForeignObjective(uuid::Uuid),

  #[error("Invalid status: {0}")]
  InvalidStatus(String),

  #[error("Invalid cost type: {0}")]
  InvalidCostKind(String),

  #[error("Invalid join request action: {0}")]
  InvalidDecision(String),
}

impl From<sqlx::Error> for ProjectError {
  fn from(error: sqlx::Error) -> Self {
    ProjectError::Repository(RepositoryError::from(error))
  }
}

/// User directory failures surface as repository errors
impl From<AuthError> for ProjectError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::Repository(e) => ProjectError::Repository(e),
      AuthError::ValueObject(e) => ProjectError::ValueObject(e),
      other => ProjectError::Repository(RepositoryError::QueryFailed(other.to_string())),
    }
  }
}
