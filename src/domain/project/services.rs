use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::value_objects::Email;
use crate::domain::notification::entities::NotificationDraft;
use crate::domain::notification::services::NotificationService;

use super::access::{invalidate, load_as_leader, load_for_edit, load_visible};
use super::board::{self, TaskGroup, TaskQuery};
use super::entities::{
  Actor, Cost, CostKind, MajorItem, Objective, Project, ProjectAggregate, ProjectStatus, Task,
  TaskDetails, TaskStatus, default_end_date,
};
use super::errors::{ProjectError, ValidationError};
use super::ports::{
  CostRepository, MajorItemRepository, ObjectiveRepository, ProjectCache, ProjectRepository,
  TaskRepository,
};
use super::progress::{CostSummary, TaskCounts};
use super::team::load_team;
use super::value_objects::{
  Amount, CostDescription, Description, MajorItemName, ObjectiveContent, ProjectName, Schedule,
  TaskTitle,
};
use super::views::{
  ProjectDetails, ProjectFilter, ProjectListing, ProjectStats, ProjectSummary, TaskView,
};

/// Project creation data; missing dates take their defaults
#[derive(Debug, Clone)]
pub struct ProjectData {
  pub name: ProjectName,
  pub description: Description,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
}

/// Project update data; every field is replaced
#[derive(Debug, Clone)]
pub struct ProjectUpdateData {
  pub name: ProjectName,
  pub description: Description,
  pub schedule: Schedule,
}

/// Task creation and update data
#[derive(Debug, Clone)]
pub struct TaskData {
  pub major_item_id: Uuid,
  pub title: TaskTitle,
  pub deadline: NaiveDate,
  pub main_resp: Option<Email>,
  pub sub_resp: Option<Email>,
  pub objective_ids: Vec<Uuid>,
}

pub struct ProjectServiceDependencies {
  pub project_repo: Arc<dyn ProjectRepository>,
  pub task_repo: Arc<dyn TaskRepository>,
  pub objective_repo: Arc<dyn ObjectiveRepository>,
  pub major_item_repo: Arc<dyn MajorItemRepository>,
  pub cost_repo: Arc<dyn CostRepository>,
  pub user_repo: Arc<dyn UserRepository>,
  pub cache: Arc<dyn ProjectCache>,
  pub notifications: Arc<NotificationService>,
}

/// Projects, their sub-items and tasks
pub struct ProjectService {
  project_repo: Arc<dyn ProjectRepository>,
  task_repo: Arc<dyn TaskRepository>,
  objective_repo: Arc<dyn ObjectiveRepository>,
  major_item_repo: Arc<dyn MajorItemRepository>,
  cost_repo: Arc<dyn CostRepository>,
  user_repo: Arc<dyn UserRepository>,
  cache: Arc<dyn ProjectCache>,
  notifications: Arc<NotificationService>,
}

impl ProjectService {
  pub fn new(deps: ProjectServiceDependencies) -> Self {
    Self {
      project_repo: deps.project_repo,
      task_repo: deps.task_repo,
      objective_repo: deps.objective_repo,
      major_item_repo: deps.major_item_repo,
      cost_repo: deps.cost_repo,
      user_repo: deps.user_repo,
      cache: deps.cache,
      notifications: deps.notifications,
    }
  }

  // Project operations

  pub async fn create_project(
    &self,
    actor: &Actor,
    data: ProjectData,
  ) -> Result<Project, ProjectError> {
    let start_date = data.start_date.unwrap_or_else(|| Utc::now().date_naive());
    let end_date = data.end_date.unwrap_or_else(|| default_end_date(start_date));
    let schedule = Schedule::new(start_date, end_date)?;

    let project = Project::new(
      data.name.into_inner(),
      data.description.into_inner(),
      Some(schedule.start_date),
      Some(schedule.end_date),
      actor.id,
    );
    let created = self.project_repo.create(project).await?;

    tracing::info!(project_id = %created.id, owner_id = %actor.id, "Project created");

    Ok(created)
  }

  /// Projects the actor owns, belongs to or supervises, newest first
  pub async fn list_projects(
    &self,
    actor: &Actor,
    filter: &ProjectFilter,
  ) -> Result<ProjectListing, ProjectError> {
    let visible = self
      .project_repo
      .find_visible_to(actor.id, &actor.email)
      .await?;
    let stats = ProjectStats::from_projects(&visible);

    let ids: Vec<Uuid> = visible.iter().map(|p| p.id).collect();
    let counts = self.task_repo.count_by_projects(&ids).await?;

    let projects = visible
      .into_iter()
      .filter(|p| filter.matches(p, p.owner_id == actor.id))
      .map(|project| {
        let task_counts = counts.get(&project.id).copied().unwrap_or_default();
        let role = project.permissions_for(actor).role();
        ProjectSummary {
          progress: task_counts.progress(),
          task_counts,
          role,
          project,
        }
      })
      .collect();

    Ok(ProjectListing { projects, stats })
  }

  pub async fn get_project_details(
    &self,
    actor: &Actor,
    project_id: Uuid,
  ) -> Result<ProjectDetails, ProjectError> {
    let (project, permissions) =
      load_visible(self.project_repo.as_ref(), project_id, actor).await?;
    let aggregate = self.load_aggregate(project).await?;
    let team = load_team(self.user_repo.as_ref(), &aggregate.project).await?;

    let today = Utc::now().date_naive();
    let task_counts = TaskCounts::from_tasks(&aggregate.tasks);
    let cost_summary = CostSummary::from_costs(&aggregate.costs);

    Ok(ProjectDetails {
      project: aggregate.project,
      objectives: aggregate.objectives,
      major_items: aggregate.major_items,
      tasks: aggregate
        .tasks
        .into_iter()
        .map(|t| TaskView::new(t, today))
        .collect(),
      costs: aggregate.costs,
      cost_summary,
      progress: task_counts.progress(),
      task_counts,
      team,
      permissions,
    })
  }

  pub async fn update_project(
    &self,
    actor: &Actor,
    project_id: Uuid,
    data: ProjectUpdateData,
  ) -> Result<Project, ProjectError> {
    let mut project = load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    project.update_info(
      data.name.into_inner(),
      data.description.into_inner(),
      data.schedule.start_date,
      data.schedule.end_date,
    );
    let updated = self.project_repo.update(project).await?;
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(updated)
  }

  pub async fn delete_project(&self, actor: &Actor, project_id: Uuid) -> Result<(), ProjectError> {
    load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    self.project_repo.delete(project_id).await?;
    invalidate(self.cache.as_ref(), project_id).await;

    tracing::info!(%project_id, "Project deleted");

    Ok(())
  }

  /// Marks the project completed once every task is done
  pub async fn finish_project(
    &self,
    actor: &Actor,
    project_id: Uuid,
  ) -> Result<Project, ProjectError> {
    let project = load_as_leader(self.project_repo.as_ref(), project_id, actor).await?;

    let tasks = self.task_repo.find_by_project(project_id).await?;
    if !TaskCounts::from_tasks(&tasks).all_done() {
      return Err(ProjectError::TasksIncomplete);
    }

    let updated = self
      .project_repo
      .update_status(project.id, ProjectStatus::Completed)
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(updated)
  }

  // Sub-items

  pub async fn create_objective(
    &self,
    actor: &Actor,
    project_id: Uuid,
    content: ObjectiveContent,
  ) -> Result<Objective, ProjectError> {
    load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;

    let objective = self
      .objective_repo
      .create(Objective::new(project_id, content.into_inner()))
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(objective)
  }

  pub async fn delete_objective(
    &self,
    actor: &Actor,
    project_id: Uuid,
    objective_id: Uuid,
  ) -> Result<(), ProjectError> {
    load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;

    if !self.objective_repo.delete(project_id, objective_id).await? {
      return Err(ProjectError::ObjectiveNotFound);
    }
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(())
  }

  pub async fn create_major_item(
    &self,
    actor: &Actor,
    project_id: Uuid,
    name: MajorItemName,
  ) -> Result<MajorItem, ProjectError> {
    load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;

    let item = self
      .major_item_repo
      .create(MajorItem::new(project_id, name.into_inner()))
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(item)
  }

  /// Deletes the major item and its tasks
  pub async fn delete_major_item(
    &self,
    actor: &Actor,
    project_id: Uuid,
    major_item_id: Uuid,
  ) -> Result<(), ProjectError> {
    load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;

    if !self.major_item_repo.delete(project_id, major_item_id).await? {
      return Err(ProjectError::MajorItemNotFound);
    }
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(())
  }

  pub async fn create_cost(
    &self,
    actor: &Actor,
    project_id: Uuid,
    description: CostDescription,
    amount: Amount,
    kind: CostKind,
  ) -> Result<Cost, ProjectError> {
    load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;

    let cost = self
      .cost_repo
      .create(Cost::new(
        project_id,
        description.into_inner(),
        amount.value(),
        kind,
      ))
      .await?;
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(cost)
  }

  pub async fn delete_cost(
    &self,
    actor: &Actor,
    project_id: Uuid,
    cost_id: Uuid,
  ) -> Result<(), ProjectError> {
    load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;

    if !self.cost_repo.delete(project_id, cost_id).await? {
      return Err(ProjectError::CostNotFound);
    }
    invalidate(self.cache.as_ref(), project_id).await;

    Ok(())
  }

  // Tasks

  pub async fn create_task(
    &self,
    actor: &Actor,
    project_id: Uuid,
    data: TaskData,
  ) -> Result<Task, ProjectError> {
    let project = load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;
    let details = self.validate_task_data(project_id, data).await?;

    let task = self.task_repo.create(Task::new(project_id, details)).await?;
    invalidate(self.cache.as_ref(), project_id).await;

    if let Some(resp) = &task.main_resp {
      self.notify_assignment(&project, &task, resp).await;
    }

    Ok(task)
  }

  /// Replaces the task's fields and objective links
  pub async fn update_task(
    &self,
    actor: &Actor,
    project_id: Uuid,
    task_id: Uuid,
    data: TaskData,
  ) -> Result<Task, ProjectError> {
    let project = load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;
    let mut task = self.find_task(project_id, task_id).await?;
    let details = self.validate_task_data(project_id, data).await?;

    let previous_resp = task.main_resp.clone();
    task.apply(details);
    let updated = self.task_repo.update(task).await?;
    invalidate(self.cache.as_ref(), project_id).await;

    if let Some(resp) = &updated.main_resp {
      let changed = previous_resp
        .as_deref()
        .is_none_or(|prev| !prev.eq_ignore_ascii_case(resp));
      if changed {
        self.notify_assignment(&project, &updated, resp).await;
      }
    }

    Ok(updated)
  }

  /// Succeeds whether or not the task still exists
  pub async fn delete_task(
    &self,
    actor: &Actor,
    project_id: Uuid,
    task_id: Uuid,
  ) -> Result<(), ProjectError> {
    load_for_edit(self.project_repo.as_ref(), project_id, actor).await?;

    if self.task_repo.delete(project_id, task_id).await? {
      invalidate(self.cache.as_ref(), project_id).await;
    }

    Ok(())
  }

  /// Sets or toggles a task's status, then recomputes the project status.
  ///
  /// Only the leader and the task's main responsible may do this. The main
  /// responsible need not be on the team.
  pub async fn toggle_task_status(
    &self,
    actor: &Actor,
    project_id: Uuid,
    task_id: Uuid,
    status: Option<TaskStatus>,
  ) -> Result<(Task, ProjectStatus), ProjectError> {
    let mut project = self
      .project_repo
      .find_by_id(project_id)
      .await?
      .ok_or(ProjectError::ProjectNotFound)?;
    let mut task = self.find_task(project_id, task_id).await?;

    if !project.permissions_for(actor).is_leader && !task.is_assigned_to(&actor.email) {
      return Err(ProjectError::NotAssignee);
    }

    let new_status = status.unwrap_or_else(|| task.status.toggled());
    self.task_repo.update_status(task.id, new_status).await?;
    task.set_status(new_status);

    let tasks = self.task_repo.find_by_project(project_id).await?;
    let derived = TaskCounts::from_tasks(&tasks).derived_status();
    if project.status != derived {
      project = self.project_repo.update_status(project_id, derived).await?;
    }
    invalidate(self.cache.as_ref(), project_id).await;

    Ok((task, project.status))
  }

  pub async fn list_tasks(
    &self,
    actor: &Actor,
    project_id: Uuid,
    query: &TaskQuery,
  ) -> Result<Vec<TaskGroup>, ProjectError> {
    load_visible(self.project_repo.as_ref(), project_id, actor).await?;

    let tasks = self.task_repo.find_by_project(project_id).await?;
    let major_items = self.major_item_repo.find_by_project(project_id).await?;

    Ok(board::arrange(tasks, &major_items, query))
  }

  // Helpers

  async fn find_task(&self, project_id: Uuid, task_id: Uuid) -> Result<Task, ProjectError> {
    self
      .task_repo
      .find_by_id(task_id)
      .await?
      .filter(|t| t.project_id == project_id)
      .ok_or(ProjectError::TaskNotFound)
  }

  /// Checks that the major item and objectives belong to the project
  async fn validate_task_data(
    &self,
    project_id: Uuid,
    data: TaskData,
  ) -> Result<TaskDetails, ProjectError> {
    let major_items = self.major_item_repo.find_by_project(project_id).await?;
    if !major_items.iter().any(|m| m.id == data.major_item_id) {
      return Err(ValidationError::ForeignMajorItem.into());
    }

    let mut objective_ids = Vec::with_capacity(data.objective_ids.len());
    if !data.objective_ids.is_empty() {
      let known: HashSet<Uuid> = self
        .objective_repo
        .find_by_project(project_id)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();

      for id in data.objective_ids {
        if !known.contains(&id) {
          return Err(ValidationError::ForeignObjective(id).into());
        }
        if !objective_ids.contains(&id) {
          objective_ids.push(id);
        }
      }
    }

    Ok(TaskDetails {
      major_item_id: data.major_item_id,
      minor_item: data.title.into_inner(),
      deadline: data.deadline,
      main_resp: data.main_resp.map(Email::into_inner),
      sub_resp: data.sub_resp.map(Email::into_inner),
      objective_ids,
    })
  }

  async fn load_aggregate(&self, project: Project) -> Result<ProjectAggregate, ProjectError> {
    match self.cache.get(project.id).await {
      // The project row is always fresh; membership checks rely on it
      Ok(Some(cached)) => return Ok(ProjectAggregate { project, ..cached }),
      Ok(None) => {}
      Err(e) => tracing::warn!(project_id = %project.id, error = %e, "Project cache read failed"),
    }

    let aggregate = ProjectAggregate {
      objectives: self.objective_repo.find_by_project(project.id).await?,
      major_items: self.major_item_repo.find_by_project(project.id).await?,
      tasks: self.task_repo.find_by_project(project.id).await?,
      costs: self.cost_repo.find_by_project(project.id).await?,
      project,
    };

    if let Err(e) = self.cache.put(&aggregate).await {
      tracing::warn!(project_id = %aggregate.project.id, error = %e, "Project cache write failed");
    }

    Ok(aggregate)
  }

  async fn notify_assignment(&self, project: &Project, task: &Task, email: &str) {
    let content = format!(
      "You have been assigned the task \"{}\" in project \"{}\"",
      task.minor_item, project.name
    );
    self
      .notifications
      .notify_email(email, NotificationDraft::info(content, project.id, project.link()))
      .await;
  }
}
