use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::project::value_objects::{Amount, CostDescription};
use crate::domain::project::{Actor, Cost, CostKind, ProjectError, ProjectService};

#[derive(Debug, Clone)]
pub struct CreateCostCommand {
  pub actor: Actor,
  pub project_id: Uuid,
  pub description: String,
  pub amount: Decimal,
  /// `INCOME` or `EXPENSE`, case-insensitive
  pub kind: String,
}

pub struct CreateCostUseCase {
  project_service: Arc<ProjectService>,
}

impl CreateCostUseCase {
  pub fn new(project_service: Arc<ProjectService>) -> Self {
    Self { project_service }
  }

  /// Adds a budget line to a project
  ///
  /// # Arguments
  /// * `command` - Description, amount and `INCOME`/`EXPENSE` kind
  ///
  /// # Returns
  /// The stored `Cost`
  ///
  /// # Errors
  /// Returns `ProjectError::Validation` for a blank description or unknown kind,
  /// and for amounts that do not fit a positive two-decimal money column
  pub async fn execute(&self, command: CreateCostCommand) -> Result<Cost, ProjectError> {
    let description = CostDescription::new(command.description)?;
    let amount = Amount::new(command.amount)?;
    let kind = CostKind::from_str(&command.kind)?;

    self
      .project_service
      .create_cost(&command.actor, command.project_id, description, amount, kind)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::project::{ProjectData, ValidationError};
  use crate::domain::project::value_objects::{Description, ProjectName};
  use crate::domain::testutil::ProjectHarness;

  #[tokio::test]
  async fn test_rejects_unknown_kind_and_non_positive_amount() {
    let h = ProjectHarness::new();
    let leader = h.actor("lead@x.io", None);
    let project = h
      .projects
      .create_project(
        &leader,
        ProjectData {
          name: ProjectName::new("Budget").unwrap(),
          description: Description::new(None).unwrap(),
          start_date: None,
          end_date: None,
        },
      )
      .await
      .unwrap();
    let use_case = CreateCostUseCase::new(h.projects.clone());
    let command = |amount: i64, kind: &str| CreateCostCommand {
      actor: leader.clone(),
      project_id: project.id,
      description: "Servers".to_string(),
      amount: Decimal::from(amount),
      kind: kind.to_string(),
    };

    let err = use_case.execute(command(10, "refund")).await.unwrap_err();
    assert!(matches!(
      err,
      ProjectError::Validation(ValidationError::InvalidCostKind(_))
    ));

    let err = use_case.execute(command(0, "expense")).await.unwrap_err();
    assert!(matches!(
      err,
      ProjectError::Validation(ValidationError::NonPositiveAmount)
    ));

    let mut sub_cent = command(1, "expense");
    sub_cent.amount = Decimal::new(1, 3);
    let err = use_case.execute(sub_cent).await.unwrap_err();
    assert!(matches!(
      err,
      ProjectError::Validation(ValidationError::AmountTooPrecise { .. })
    ));

    let err = use_case
      .execute(command(1_000_000_000_000_000, "expense"))
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      ProjectError::Validation(ValidationError::AmountTooLarge { .. })
    ));

    let cost = use_case.execute(command(120, "expense")).await.unwrap();
    assert_eq!(cost.kind, CostKind::Expense);
    assert_eq!(cost.amount, Decimal::from(120));
  }
}
