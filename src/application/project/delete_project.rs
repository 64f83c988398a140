use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::entities::Actor;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::services::ProjectService;

#[derive(Debug, Clone)]
pub struct DeleteProjectCommand {
  pub actor: Actor,
  pub project_id: Uuid,
}

/// Deletes a project with all of its objectives, items, tasks and costs
pub struct DeleteProjectUseCase {
  project_service: Arc<ProjectService>,
}

impl DeleteProjectUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// # Errors
  /// Returns `ProjectError::NotLeader` unless the caller owns the project
  pub async fn execute(&self, command: DeleteProjectCommand) -> Result<(), ProjectError> {
    self
      .project_service
      .delete_project(&command.actor, command.project_id)
      .await
  }
}
