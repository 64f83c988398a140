use std::sync::Arc;
use uuid::Uuid;

use super::invite_team_member::TeamRole;
use crate::domain::project::{Actor, Project, ProjectError, TeamService};

#[derive(Debug, Clone)]
pub struct RemoveTeamMemberCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  /// Removal is a no-op when the email is not on the team
  pub email: String,
  pub role: TeamRole,
}

pub struct RemoveTeamMemberUseCase {
  team_service: Arc<TeamService>,
}

impl RemoveTeamMemberUseCase {
  pub fn new(team_service: Arc<TeamService>) -> Self {
    Self { team_service }
  }

  pub async fn execute(&self, command: RemoveTeamMemberCommand) -> Result<Project, ProjectError> {
    match command.role {
      TeamRole::Member => {
        self
          .team_service
          .remove_member(&command.actor, command.project_id, &command.email)
          .await
      }
      TeamRole::Supervisor => {
        self
          .team_service
          .remove_supervisor(&command.actor, command.project_id, &command.email)
          .await
      }
    }
  }
}
