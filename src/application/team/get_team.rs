use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::{Actor, ProjectError, TeamMember, TeamService};

#[derive(Debug, Clone)]
pub struct GetTeamCommand {
  pub actor: Actor,
  pub project_id: Uuid,
}

pub struct GetTeamUseCase {
  team_service: Arc<TeamService>,
}

impl GetTeamUseCase {
  pub fn new(team_service: Arc<TeamService>) -> Self {
    Self { team_service }
  }

  pub async fn execute(&self, command: GetTeamCommand) -> Result<Vec<TeamMember>, ProjectError> {
    self
      .team_service
      .team(&command.actor, command.project_id)
      .await
  }
}
