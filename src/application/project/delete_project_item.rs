use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::{Actor, ProjectError, ProjectService};

/// Kinds of records that hang off a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectItem {
  Objective,
  MajorItem,
  Cost,
  Task,
}

#[derive(Debug, Clone)]
pub struct DeleteProjectItemCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub item: ProjectItem,
  pub item_id: Uuid,
}

pub struct DeleteProjectItemUseCase {
  project_service: Arc<ProjectService>,
}

impl DeleteProjectItemUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Deletes an objective, major item, cost or task
  ///
  /// # Arguments
  /// * `command` - The project, the item kind and the item id
  ///
  /// # Errors
  /// Returns `ProjectError` if the caller cannot edit the project or the item
  /// belongs to another project
  pub async fn execute(&self, command: DeleteProjectItemCommand) -> Result<(), ProjectError> {
    let DeleteProjectItemCommand {
      actor,
      project_id,
      item,
      item_id,
    } = command;
    let service = &self.project_service;

    match item {
      ProjectItem::Objective => service.delete_objective(&actor, project_id, item_id).await,
      ProjectItem::MajorItem => service.delete_major_item(&actor, project_id, item_id).await,
      ProjectItem::Cost => service.delete_cost(&actor, project_id, item_id).await,
      ProjectItem::Task => service.delete_task(&actor, project_id, item_id).await,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::project::value_objects::{Description, ObjectiveContent, ProjectName};
  use crate::domain::project::ProjectData;
  use crate::domain::testutil::ProjectHarness;

  #[tokio::test]
  async fn test_dispatches_by_item_kind() {
    let h = ProjectHarness::new();
    let leader = h.actor("lead@x.io", None);
    let project = h
      .projects
      .create_project(
        &leader,
        ProjectData {
          name: ProjectName::new("Launch").unwrap(),
          description: Description::new(None).unwrap(),
          start_date: None,
          end_date: None,
        },
      )
      .await
      .unwrap();
    let objective = h
      .projects
      .create_objective(&leader, project.id, ObjectiveContent::new("Ship").unwrap())
      .await
      .unwrap();
    let use_case = DeleteProjectItemUseCase::new(h.projects.clone());
    let command = |item, item_id| DeleteProjectItemCommand {
      actor: leader.clone(),
      project_id: project.id,
      item,
      item_id,
    };

    use_case
      .execute(command(ProjectItem::Objective, objective.id))
      .await
      .unwrap();

    let err = use_case
      .execute(command(ProjectItem::Objective, objective.id))
      .await
      .unwrap_err();
    assert!(matches!(err, ProjectError::ObjectiveNotFound));

    let err = use_case
      .execute(command(ProjectItem::Cost, Uuid::new_v4()))
      .await
      .unwrap_err();
    assert!(matches!(err, ProjectError::CostNotFound));

    // Missing tasks are not an error
    use_case
      .execute(command(ProjectItem::Task, Uuid::new_v4()))
      .await
      .unwrap();
  }
}
