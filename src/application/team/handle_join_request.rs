use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::{Actor, JoinDecision, ProjectError, TeamService};

#[derive(Debug, Clone)]
pub struct HandleJoinRequestCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub request_id: Uuid,
  /// `accept` or `reject`
  pub action: String,
}

pub struct HandleJoinRequestUseCase {
  team_service: Arc<TeamService>,
}

impl HandleJoinRequestUseCase {
  pub fn new(team_service: Arc<TeamService>) -> Self {
    Self { team_service }
  }

  /// Accepts or rejects a pending join request
  ///
  /// # Arguments
  /// * `command` - The request id and an `ACCEPT` or `REJECT` action
  ///
  /// # Errors
  /// Returns `ProjectError::NotLeader` unless the caller owns the project, or a
  /// validation error for an unknown action
  pub async fn execute(&self, command: HandleJoinRequestCommand) -> Result<(), ProjectError> {
    let decision = JoinDecision::from_str(&command.action)?;

    self
      .team_service
      .handle_join_request(
        &command.actor,
        command.project_id,
        command.request_id,
        decision,
      )
      .await
  }
}
