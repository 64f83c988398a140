use std::sync::Arc;

use crate::domain::project::{Actor, JoinRequest, ProjectError, TeamService};

#[derive(Debug, Clone)]
pub struct RequestToJoinCommand {
  pub actor: Actor,
  /// Project id as entered by the user, may contain stray whitespace
  pub project_id: String,
}

pub struct RequestToJoinUseCase {
  team_service: Arc<TeamService>,
}

impl RequestToJoinUseCase {
  pub fn new(team_service: Arc<TeamService>) -> Self {
    Self { team_service }
  }

  /// # Errors
  /// Returns `ProjectError::ProjectNotFound` for an unknown or malformed id, or
  /// a conflict if the caller already belongs to the project or has a pending request
  pub async fn execute(&self, command: RequestToJoinCommand) -> Result<JoinRequest, ProjectError> {
    self
      .team_service
      .request_to_join(&command.actor, &command.project_id)
      .await
  }
}
