use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::entities::{Actor, Project};
use crate::domain::project::errors::ProjectError;
use crate::domain::project::services::ProjectService;

#[derive(Debug, Clone)]
pub struct FinishProjectCommand {
  pub actor: Actor,
  pub project_id: Uuid,
}

pub struct FinishProjectUseCase {
  project_service: Arc<ProjectService>,
}

impl FinishProjectUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Marks the project completed
  ///
  /// # Errors
  /// Returns `ProjectError::TasksIncomplete` while any task is not done
  pub async fn execute(&self, command: FinishProjectCommand) -> Result<Project, ProjectError> {
    self
      .project_service
      .finish_project(&command.actor, command.project_id)
      .await
  }
}
