use std::sync::Arc;

use crate::domain::project::entities::Actor;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::services::ProjectService;
use crate::domain::project::views::{ProjectFilter, ProjectListing, RoleFilter, StatusFilter};

#[derive(Debug, Clone)]
pub struct ListProjectsCommand {
  pub actor: Actor,
  pub search: Option<String>,
  pub status: StatusFilter,
  pub role: RoleFilter,
}

pub struct ListProjectsUseCase {
  project_service: Arc<ProjectService>,
}

impl ListProjectsUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Lists projects visible to the caller
  ///
  /// # Returns
  /// A `ProjectListing` whose stats ignore the search, status and role filters
  pub async fn execute(&self, command: ListProjectsCommand) -> Result<ProjectListing, ProjectError> {
    let filter = ProjectFilter {
      search: command.search,
      status: command.status,
      role: command.role,
    };

    self
      .project_service
      .list_projects(&command.actor, &filter)
      .await
  }
}
