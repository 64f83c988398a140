use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::{Actor, ProjectError, ProjectService, TaskQuery, TaskView};

#[derive(Debug, Clone)]
pub struct ListTasksCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub query: TaskQuery,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskGroupView {
  pub key: String,
  pub label: String,
  pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone)]
pub struct ListTasksResponse {
  pub groups: Vec<TaskGroupView>,
  pub total: usize,
}

pub struct ListTasksUseCase {
  project_service: Arc<ProjectService>,
}

impl ListTasksUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  pub async fn execute(&self, command: ListTasksCommand) -> Result<ListTasksResponse, ProjectError> {
    let groups = self
      .project_service
      .list_tasks(&command.actor, command.project_id, &command.query)
      .await?;

    let today = Utc::now().date_naive();
    let groups: Vec<TaskGroupView> = groups
      .into_iter()
      .map(|group| TaskGroupView {
        key: group.key,
        label: group.label,
        tasks: group
          .tasks
          .into_iter()
          .map(|task| TaskView::new(task, today))
          .collect(),
      })
      .collect();
    let total = groups.iter().map(|g| g.tasks.len()).sum();

    Ok(ListTasksResponse { groups, total })
  }
}
