use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::entities::Actor;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::services::ProjectService;
use crate::domain::project::views::ProjectDetails;

#[derive(Debug, Clone)]
pub struct GetProjectDetailsCommand {
  pub actor: Actor,
  pub project_id: Uuid,
}

pub struct GetProjectDetailsUseCase {
  project_service: Arc<ProjectService>,
}

impl GetProjectDetailsUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Loads the project with its sub-items, team, progress and budget
  ///
  /// # Arguments
  /// * `command` - The caller and the project id
  ///
  /// # Returns
  /// `ProjectDetails` including the caller's permissions
  ///
  /// # Errors
  /// Returns `ProjectError::ProjectNotFound` if the project is missing or
  /// hidden from the caller
  pub async fn execute(
    &self,
    command: GetProjectDetailsCommand,
  ) -> Result<ProjectDetails, ProjectError> {
    self
      .project_service
      .get_project_details(&command.actor, command.project_id)
      .await
  }
}
