use uuid::Uuid;

use super::entities::{Actor, Project, ProjectPermissions};
use super::errors::ProjectError;
use super::ports::{ProjectCache, ProjectRepository};

/// Loads a project the actor may view; hidden projects look missing
pub(super) async fn load_visible(
  repo: &dyn ProjectRepository,
  project_id: Uuid,
  actor: &Actor,
) -> Result<(Project, ProjectPermissions), ProjectError> {
  let project = repo
    .find_by_id(project_id)
    .await?
    .ok_or(ProjectError::ProjectNotFound)?;

  let permissions = project.permissions_for(actor);
  if !permissions.can_view() {
    return Err(ProjectError::ProjectNotFound);
  }

  Ok((project, permissions))
}

pub(super) async fn load_for_edit(
  repo: &dyn ProjectRepository,
  project_id: Uuid,
  actor: &Actor,
) -> Result<Project, ProjectError> {
  let (project, permissions) = load_visible(repo, project_id, actor).await?;
  if !permissions.can_edit() {
    return Err(ProjectError::NotMember);
  }
  Ok(project)
}

pub(super) async fn load_as_leader(
  repo: &dyn ProjectRepository,
  project_id: Uuid,
  actor: &Actor,
) -> Result<Project, ProjectError> {
  let (project, permissions) = load_visible(repo, project_id, actor).await?;
  if !permissions.is_leader {
    return Err(ProjectError::NotLeader);
  }
  Ok(project)
}

/// Drops the cached aggregate; failures are logged only
pub(super) async fn invalidate(cache: &dyn ProjectCache, project_id: Uuid) {
  if let Err(e) = cache.invalidate(project_id).await {
    tracing::warn!(%project_id, error = %e, "Failed to invalidate project cache");
  }
}
