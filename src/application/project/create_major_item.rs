use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::value_objects::MajorItemName;
use crate::domain::project::{Actor, MajorItem, ProjectError, ProjectService};

#[derive(Debug, Clone)]
pub struct CreateMajorItemCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub name: String,
}

pub struct CreateMajorItemUseCase {
  project_service: Arc<ProjectService>,
}

impl CreateMajorItemUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  pub async fn execute(&self, command: CreateMajorItemCommand) -> Result<MajorItem, ProjectError> {
    let name = MajorItemName::new(command.name)?;

    self
      .project_service
      .create_major_item(&command.actor, command.project_id, name)
      .await
  }
}
