use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::value_objects::Email;
use crate::domain::project::value_objects::TaskTitle;
use crate::domain::project::{Actor, ProjectError, ProjectService, Task, TaskData};

/// Editable task fields as submitted by the client
#[derive(Debug, Clone)]
pub struct TaskFields {
  pub major_item_id: Uuid,
  pub minor_item: String,
  pub deadline: NaiveDate,
  pub main_resp: Option<String>,
  pub sub_resp: Option<String>,
  pub objective_ids: Vec<Uuid>,
}

impl TaskFields {
  pub(super) fn into_data(self) -> Result<TaskData, ProjectError> {
    Ok(TaskData {
      major_item_id: self.major_item_id,
      title: TaskTitle::new(self.minor_item)?,
      deadline: self.deadline,
      main_resp: optional_email(self.main_resp)?,
      sub_resp: optional_email(self.sub_resp)?,
      objective_ids: self.objective_ids,
    })
  }
}

/// Blank responsibles mean unassigned
fn optional_email(value: Option<String>) -> Result<Option<Email>, ProjectError> {
  match value.filter(|v| !v.trim().is_empty()) {
    Some(v) => Ok(Some(Email::new(v)?)),
    None => Ok(None),
  }
}

#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub fields: TaskFields,
}

pub struct CreateTaskUseCase {
  project_service: Arc<ProjectService>,
}

impl CreateTaskUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Adds a task under one of the project's major items
  ///
  /// # Errors
  /// Returns `ProjectError::NotMember` for supervisors, and a validation error
  /// when a referenced item belongs to another project
  pub async fn execute(&self, command: CreateTaskCommand) -> Result<Task, ProjectError> {
    let data = command.fields.into_data()?;

    self
      .project_service
      .create_task(&command.actor, command.project_id, data)
      .await
  }
}
