use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::{Actor, ProjectError, ProjectService, ProjectStatus, Task, TaskStatus};

#[derive(Debug, Clone)]
pub struct ToggleTaskStatusCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub task_id: Uuid,
  /// Explicit target status; toggles between done and pending when absent
  pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ToggleTaskStatusResponse {
  pub task: Task,
  pub project_status: ProjectStatus,
}

pub struct ToggleTaskStatusUseCase {
  project_service: Arc<ProjectService>,
}

impl ToggleTaskStatusUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Sets a task's status, or flips it between done and pending when no
  /// status is given
  ///
  /// # Arguments
  /// * `command` - The caller, project and task ids, and an optional status
  ///
  /// # Returns
  /// The updated task and the recomputed project status
  ///
  /// # Errors
  /// Returns `ProjectError::NotAssignee` unless the caller leads the project or
  /// is the task's main responsible
  pub async fn execute(
    &self,
    command: ToggleTaskStatusCommand,
  ) -> Result<ToggleTaskStatusResponse, ProjectError> {
    let status = command
      .status
      .as_deref()
      .map(TaskStatus::from_str)
      .transpose()?;

    let (task, project_status) = self
      .project_service
      .toggle_task_status(&command.actor, command.project_id, command.task_id, status)
      .await?;

    Ok(ToggleTaskStatusResponse {
      task,
      project_status,
    })
  }
}
