use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use super::entities::{
  Cost, JoinRequest, MajorItem, Objective, Project, ProjectAggregate, ProjectStatus, Roster, Task,
  TaskStatus,
};
use super::errors::ProjectError;
use super::progress::TaskCounts;
use crate::domain::auth::errors::RepositoryError;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
  async fn create(&self, project: Project) -> Result<Project, ProjectError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectError>;

  /// Projects owned by `user_id` or listing `email` as member or supervisor,
  /// newest first
  async fn find_visible_to(&self, user_id: Uuid, email: &str)
  -> Result<Vec<Project>, ProjectError>;

  /// Writes name, description and schedule; status and team lists are untouched
  async fn update(&self, project: Project) -> Result<Project, ProjectError>;

  async fn update_status(&self, id: Uuid, status: ProjectStatus)
  -> Result<Project, ProjectError>;

  /// Appends a lowercased email unless already listed
  async fn add_to_roster(
    &self,
    id: Uuid,
    roster: Roster,
    email: &str,
  ) -> Result<Project, ProjectError>;

  async fn remove_from_roster(
    &self,
    id: Uuid,
    roster: Roster,
    email: &str,
  ) -> Result<Project, ProjectError>;

  /// Deletes the project and every child record
  async fn delete(&self, id: Uuid) -> Result<(), ProjectError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
  async fn create(&self, task: Task) -> Result<Task, ProjectError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, ProjectError>;

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, ProjectError>;

  /// Totals keyed by project id; projects without tasks may be absent
  async fn count_by_projects(
    &self,
    project_ids: &[Uuid],
  ) -> Result<HashMap<Uuid, TaskCounts>, ProjectError>;

  /// Replaces task fields and its objective links
  async fn update(&self, task: Task) -> Result<Task, ProjectError>;

  async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<(), ProjectError>;

  /// Returns false when nothing was deleted
  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError>;
}

#[async_trait]
pub trait ObjectiveRepository: Send + Sync {
  async fn create(&self, objective: Objective) -> Result<Objective, ProjectError>;

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Objective>, ProjectError>;

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError>;
}

#[async_trait]
pub trait MajorItemRepository: Send + Sync {
  async fn create(&self, item: MajorItem) -> Result<MajorItem, ProjectError>;

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<MajorItem>, ProjectError>;

  /// Deletes the major item together with its tasks
  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError>;
}

#[async_trait]
pub trait CostRepository: Send + Sync {
  async fn create(&self, cost: Cost) -> Result<Cost, ProjectError>;

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Cost>, ProjectError>;

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError>;
}

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
  async fn create(&self, request: JoinRequest) -> Result<JoinRequest, ProjectError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<JoinRequest>, ProjectError>;

  async fn find_by_project_and_email(
    &self,
    project_id: Uuid,
    email: &str,
  ) -> Result<Option<JoinRequest>, ProjectError>;

  async fn delete(&self, id: Uuid) -> Result<(), ProjectError>;
}

/// Read-through cache of project aggregates
#[async_trait]
pub trait ProjectCache: Send + Sync {
  async fn get(&self, project_id: Uuid) -> Result<Option<ProjectAggregate>, RepositoryError>;

  async fn put(&self, aggregate: &ProjectAggregate) -> Result<(), RepositoryError>;

  async fn invalidate(&self, project_id: Uuid) -> Result<(), RepositoryError>;
}
