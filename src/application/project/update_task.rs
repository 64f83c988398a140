use std::sync::Arc;
use uuid::Uuid;

use super::create_task::TaskFields;
use crate::domain::project::{Actor, ProjectError, ProjectService, Task};

#[derive(Debug, Clone)]
pub struct UpdateTaskCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub task_id: Uuid,
  pub fields: TaskFields,
}

pub struct UpdateTaskUseCase {
  project_service: Arc<ProjectService>,
}

impl UpdateTaskUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// # Errors
  /// Returns `ProjectError::TaskNotFound` if the task belongs to another project
  pub async fn execute(&self, command: UpdateTaskCommand) -> Result<Task, ProjectError> {
    let data = command.fields.into_data()?;

    self
      .project_service
      .update_task(&command.actor, command.project_id, command.task_id, data)
      .await
  }
}
