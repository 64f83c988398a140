use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::project::entities::{Actor, Project};
use crate::domain::project::errors::ProjectError;
use crate::domain::project::services::{ProjectData, ProjectService};
use crate::domain::project::value_objects::{Description, ProjectName};

#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
  pub actor: Actor,
  pub name: String,
  pub description: Option<String>,
  /// Defaults to today
  pub start_date: Option<NaiveDate>,
  /// Defaults to one month after the start
  pub end_date: Option<NaiveDate>,
}

pub struct CreateProjectUseCase {
  project_service: Arc<ProjectService>,
}

impl CreateProjectUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Creates a project owned by the caller
  ///
  /// # Arguments
  /// * `command` - Name, optional description and optional schedule
  ///
  /// # Returns
  /// The new `Project`; missing dates take their defaults
  ///
  /// # Errors
  /// Returns `ProjectError::Validation` if the name is blank or the end date
  /// precedes the start date
  pub async fn execute(&self, command: CreateProjectCommand) -> Result<Project, ProjectError> {
    let data = ProjectData {
      name: ProjectName::new(command.name)?,
      description: Description::new(command.description)?,
      start_date: command.start_date,
      end_date: command.end_date,
    };

    self
      .project_service
      .create_project(&command.actor, data)
      .await
  }
}
