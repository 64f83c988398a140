use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::value_objects::Email;
use crate::domain::project::{Actor, Project, ProjectError, TeamService};

/// Roles the leader can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
  Member,
  Supervisor,
}

#[derive(Debug, Clone)]
pub struct InviteTeamMemberCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub email: String,
  pub role: TeamRole,
}

pub struct InviteTeamMemberUseCase {
  team_service: Arc<TeamService>,
}

impl InviteTeamMemberUseCase {
  pub fn new(team_service: Arc<TeamService>) -> Self {
    Self { team_service }
  }

  /// Adds an email to the project's members or supervisors
  ///
  /// # Arguments
  /// * `command` - The invitee's email and the role to grant
  ///
  /// # Returns
  /// The project with its updated team lists
  ///
  /// # Errors
  /// Returns `ProjectError` if the caller is not the leader or the email
  /// already holds a role on the project
  pub async fn execute(&self, command: InviteTeamMemberCommand) -> Result<Project, ProjectError> {
    let email = Email::new(command.email)?;

    match command.role {
      TeamRole::Member => {
        self
          .team_service
          .invite_member(&command.actor, command.project_id, email)
          .await
      }
      TeamRole::Supervisor => {
        self
          .team_service
          .invite_supervisor(&command.actor, command.project_id, email)
          .await
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::project::value_objects::{Description, ProjectName};
  use crate::domain::project::ProjectData;
  use crate::domain::testutil::ProjectHarness;

  #[tokio::test]
  async fn test_invites_by_role() {
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
    let use_case = InviteTeamMemberUseCase::new(h.team.clone());
    let command = |email: &str, role| InviteTeamMemberCommand {
      actor: leader.clone(),
      project_id: project.id,
      email: email.to_string(),
      role,
    };

    let updated = use_case
      .execute(command(" Dev@X.io ", TeamRole::Member))
      .await
      .unwrap();
    assert!(updated.has_member("dev@x.io"));

    let updated = use_case
      .execute(command("boss@x.io", TeamRole::Supervisor))
      .await
      .unwrap();
    assert!(updated.has_supervisor("boss@x.io"));

    let err = use_case
      .execute(command("nope", TeamRole::Member))
      .await
      .unwrap_err();
    assert!(matches!(err, ProjectError::ValueObject(_)));
  }
}
