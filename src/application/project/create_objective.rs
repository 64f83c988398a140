use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::{Actor, Objective, ProjectError, ProjectService};
use crate::domain::project::value_objects::ObjectiveContent;

#[derive(Debug, Clone)]
pub struct CreateObjectiveCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub content: String,
}

pub struct CreateObjectiveUseCase {
  project_service: Arc<ProjectService>,
}

impl CreateObjectiveUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  pub async fn execute(&self, command: CreateObjectiveCommand) -> Result<Objective, ProjectError> {
    let content = ObjectiveContent::new(command.content)?;

    self
      .project_service
      .create_objective(&command.actor, command.project_id, content)
      .await
  }
}
