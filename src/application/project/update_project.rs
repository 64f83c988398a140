use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::entities::{Actor, Project};
use crate::domain::project::errors::ProjectError;
use crate::domain::project::services::{ProjectService, ProjectUpdateData};
use crate::domain::project::value_objects::{Description, ProjectName, Schedule};

#[derive(Debug, Clone)]
pub struct UpdateProjectCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
}

pub struct UpdateProjectUseCase {
  project_service: Arc<ProjectService>,
}

impl UpdateProjectUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  pub async fn execute(&self, command: UpdateProjectCommand) -> Result<Project, ProjectError> {
    let data = ProjectUpdateData {
      name: ProjectName::new(command.name)?,
      description: Description::new(command.description)?,
      schedule: Schedule::new(command.start_date, command.end_date)?,
    };

    self
      .project_service
      .update_project(&command.actor, command.project_id, data)
      .await
  }
}
