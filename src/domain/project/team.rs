use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::value_objects::Email;
use crate::domain::notification::entities::NotificationDraft;
use crate::domain::notification::services::NotificationService;

use super::access::{invalidate, load_as_leader, load_visible};
use super::entities::{Actor, JoinDecision, JoinRequest, Project, ProjectRole, Roster};
use super::errors::ProjectError;
use super::ports::{JoinRequestRepository, ProjectCache, ProjectRepository};
use super::views::TeamMember;

/// Leader first, then supervisors, then members; display names come from
/// the user directory when the address has an account
pub(super) async fn load_team(
  user_repo: &dyn UserRepository,
  project: &Project,
) -> Result<Vec<TeamMember>, ProjectError> {
  let emails: Vec<String> = project
    .supervisors
    .iter()
    .chain(project.members.iter())
    .cloned()
    .collect();
  let names: HashMap<String, String> = user_repo
    .find_by_emails(&emails)
    .await?
    .into_iter()
    .map(|u| (u.email.to_lowercase(), u.display_name().to_string()))
    .collect();

  let mut team = Vec::with_capacity(emails.len() + 1);

  if let Some(leader) = user_repo.find_by_id(project.owner_id).await? {
    team.push(TeamMember {
      display_name: leader.display_name().to_string(),
      email: leader.email,
      role: ProjectRole::Leader,
    });
  }

  let listed = project
    .supervisors
    .iter()
    .map(|e| (e, ProjectRole::Supervisor))
    .chain(project.members.iter().map(|e| (e, ProjectRole::Member)));
  for (email, role) in listed {
    team.push(TeamMember {
      display_name: names
        .get(&email.to_lowercase())
        .cloned()
        .unwrap_or_else(|| email.clone()),
      email: email.clone(),
      role,
    });
  }

  Ok(team)
}

pub struct TeamServiceDependencies {
  pub project_repo: Arc<dyn ProjectRepository>,
  pub join_request_repo: Arc<dyn JoinRequestRepository>,
  pub user_repo: Arc<dyn UserRepository>,
  pub cache: Arc<dyn ProjectCache>,
  pub notifications: Arc<NotificationService>,
}

/// Team membership: join requests, invitations and removals
pub struct TeamService {
  project_repo: Arc<dyn ProjectRepository>,
  join_request_repo: Arc<dyn JoinRequestRepository>,
  user_repo: Arc<dyn UserRepository>,
  cache: Arc<dyn ProjectCache>,
  notifications: Arc<NotificationService>,
}

impl TeamService {
  pub fn new(deps: TeamServiceDependencies) -> Self {
    Self {
      project_repo: deps.project_repo,
      join_request_repo: deps.join_request_repo,
      user_repo: deps.user_repo,
      cache: deps.cache,
      notifications: deps.notifications,
    }
  }

  pub async fn team(&self, actor: &Actor, project_id: Uuid) -> Result<Vec<TeamMember>, ProjectError> {
    let (project, _) = load_visible(self.project_repo.as_ref(), project_id, actor).await?;
    load_team(self.user_repo.as_ref(), &project).await
  }

  /// Files a join request for a project id as typed or pasted by the user
  pub async fn request_to_join(
    &self,
    actor: &Actor,
    project_id_text: &str,
  ) -> Result<JoinRequest, ProjectError> {
    let cleaned: String = project_id_text
      .chars()
      .filter(|c| *c != '\r' && *c != '\n')
      .collect();
    let project_id = Uuid::parse_str(cleaned.trim()).map_err(|_| ProjectError::ProjectNotFound)?;

    let project = self
      .project_repo
      .find_by_id(project_id)
      .await?
      .ok_or(ProjectError::ProjectNotFound)?;

    if project.owner_id == actor.id {
      return Err(ProjectError::AlreadyOwner);
    }
    if project.has_member(&actor.email) {
      return Err(ProjectError::AlreadyMember);
    }
    if project.has_supervisor(&actor.email) {
      return Err(ProjectError::AlreadySupervisor);
    }
    if self
      .join_request_repo
      .find_by_project_and_email(project_id, &actor.email)
      .await?
      .is_some()
    {
      return Err(ProjectError::JoinRequestPending);
    }

    let request = match self
      .join_request_repo
      .create(JoinRequest::new(project_id, actor.email.clone()))
      .await
    {
      Ok(request) => request,
      Err(ProjectError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(ProjectError::JoinRequestPending);
      }
      Err(e) => return Err(e),
    };

    let content = format!(
      "{} wants to join project \"{}\"",
      actor.display_name, project.name
    );
    self
      .notifications
      .notify_user(
        project.owner_id,
        NotificationDraft::join_request(content, project.id, request.id, project.link()),
      )
      .await;

    tracing::info!(%project_id, request_id = %request.id, "Join request created");

    Ok(request)
  }

  /// Accepts or rejects a join request. A request that is gone or belongs
  /// to another project is ignored.
  pub async fn handle_join_request(
    &self,
    actor: &Actor,
    project_id: Uuid,
    request_id: Uuid,
    decision: JoinDecision,
  ) -> Result<(), ProjectError> {
    let mut project = load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    let Some(request) = self
      .join_request_repo
      .find_by_id(request_id)
      .await?
      .filter(|r| r.project_id == project_id)
    else {
      return Ok(());
    };

    if decision == JoinDecision::Accept {
      if !project.has_member(&request.user_email) {
        project = self
          .project_repo
          .add_to_roster(project_id, Roster::Members, &request.user_email)
          .await?;
        invalidate(self.cache.as_ref(), project_id).await;
      }

      let content = format!("Your request to join \"{}\" was accepted!", project.name);
      self
        .notifications
        .notify_email(
          &request.user_email,
          NotificationDraft::info(content, project.id, project.link()),
        )
        .await;
    }

    self.join_request_repo.delete(request.id).await?;
    self
      .notifications
      .resolve_join_request(actor.id, request.id)
      .await;

    Ok(())
  }

  pub async fn invite_member(
    &self,
    actor: &Actor,
    project_id: Uuid,
    email: Email,
  ) -> Result<Project, ProjectError> {
    let project = load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    if project.has_member(email.as_str()) {
      return Err(ProjectError::AlreadyMember);
    }
    if email.as_str().eq_ignore_ascii_case(&actor.email) {
      return Err(ProjectError::AlreadyOwner);
    }
    if project.has_supervisor(email.as_str()) {
      return Err(ProjectError::AlreadySupervisor);
    }

    let updated = self
      .project_repo
      .add_to_roster(project_id, Roster::Members, email.as_str())
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    let content = format!("You have been invited to join project \"{}\"", updated.name);
    self
      .notifications
      .notify_email(
        email.as_str(),
        NotificationDraft::info(content, updated.id, updated.link()),
      )
      .await;

    Ok(updated)
  }

  pub async fn remove_member(
    &self,
    actor: &Actor,
    project_id: Uuid,
    email: &str,
  ) -> Result<Project, ProjectError> {
    load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    let updated = self
      .project_repo
      .remove_from_roster(project_id, Roster::Members, email)
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(updated)
  }

  pub async fn invite_supervisor(
    &self,
    actor: &Actor,
    project_id: Uuid,
    email: Email,
  ) -> Result<Project, ProjectError> {
    let project = load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    if project.has_supervisor(email.as_str()) {
      return Err(ProjectError::AlreadySupervisor);
    }
    if project.has_member(email.as_str()) {
      return Err(ProjectError::AlreadyMember);
    }
    if email.as_str().eq_ignore_ascii_case(&actor.email) {
      return Err(ProjectError::AlreadyOwner);
    }

    let updated = self
      .project_repo
      .add_to_roster(project_id, Roster::Supervisors, email.as_str())
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    let content = format!(
      "You have been invited to supervise project \"{}\"",
      updated.name
    );
    self
      .notifications
      .notify_email(
        email.as_str(),
        NotificationDraft::info(content, updated.id, updated.link()),
      )
      .await;

    Ok(updated)
  }

  pub async fn remove_supervisor(
    &self,
    actor: &Actor,
    project_id: Uuid,
    email: &str,
  ) -> Result<Project, ProjectError> {
    load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    let updated = self
      .project_repo
      .remove_from_roster(project_id, Roster::Supervisors, email)
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(updated)
  }
}
