use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{ProjectError, ValidationError};
use crate::domain::auth::entities::User;

/// The signed-in user performing an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
  pub id: Uuid,
  /// Primary email, lower-cased; membership is keyed by email
  pub email: String,
  pub display_name: String,
}

impl From<&User> for Actor {
  fn from(user: &User) -> Self {
    Self {
      id: user.id,
      email: user.email.to_lowercase(),
      display_name: user.display_name().to_string(),
    }
  }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
  Ongoing,
  Completed,
}

impl ProjectStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProjectStatus::Ongoing => "ONGOING",
      ProjectStatus::Completed => "COMPLETED",
    }
  }

  pub fn from_str(s: &str) -> Result<Self, ProjectError> {
    match s.to_uppercase().as_str() {
      "ONGOING" => Ok(ProjectStatus::Ongoing),
      "COMPLETED" => Ok(ProjectStatus::Completed),
      other => Err(ValidationError::InvalidStatus(other.to_string()).into()),
    }
  }
}

/// Role a user holds within one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectRole {
  Leader,
  Supervisor,
  Member,
}

impl ProjectRole {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProjectRole::Leader => "LEADER",
      ProjectRole::Supervisor => "SUPERVISOR",
      ProjectRole::Member => "MEMBER",
    }
  }
}

/// Email list on a project that a team change writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roster {
  Members,
  Supervisors,
}

/// What the caller may do with a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectPermissions {
  pub is_leader: bool,
  /// Listed member or leader
  pub is_member: bool,
  pub is_supervisor: bool,
}

impl ProjectPermissions {
  pub fn can_view(&self) -> bool {
    self.is_member || self.is_supervisor
  }

  pub fn can_edit(&self) -> bool {
    self.is_member
  }

  pub fn role(&self) -> Option<ProjectRole> {
    if self.is_leader {
      Some(ProjectRole::Leader)
    } else if self.is_supervisor {
      Some(ProjectRole::Supervisor)
    } else if self.is_member {
      Some(ProjectRole::Member)
    } else {
      None
    }
  }
}

/// Project entity: the root every other record hangs off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub owner_id: Uuid,
  /// Member emails, lower-cased, without duplicates
  pub members: Vec<String>,
  /// Supervisor emails, lower-cased, without duplicates
  pub supervisors: Vec<String>,
  pub status: ProjectStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Project {
  /// New ongoing project owned by `owner_id`. Missing dates default to
  /// today and one month after the start.
  pub fn new(
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    owner_id: Uuid,
  ) -> Self {
    let now = Utc::now();
    let start_date = start_date.unwrap_or_else(|| now.date_naive());
    let end_date = end_date.unwrap_or_else(|| default_end_date(start_date));

    Self {
      id: Uuid::new_v4(),
      name,
      description,
      start_date,
      end_date,
      owner_id,
      members: Vec::new(),
      supervisors: Vec::new(),
      status: ProjectStatus::Ongoing,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn permissions_for(&self, actor: &Actor) -> ProjectPermissions {
    let is_leader = self.owner_id == actor.id;
    ProjectPermissions {
      is_leader,
      is_member: is_leader || self.has_member(&actor.email),
      is_supervisor: self.has_supervisor(&actor.email),
    }
  }

  pub fn has_member(&self, email: &str) -> bool {
    self.members.iter().any(|m| m.eq_ignore_ascii_case(email))
  }

  pub fn has_supervisor(&self, email: &str) -> bool {
    self.supervisors.iter().any(|s| s.eq_ignore_ascii_case(email))
  }

  pub fn is_completed(&self) -> bool {
    self.status == ProjectStatus::Completed
  }

  pub fn update_info(
    &mut self,
    name: String,
    description: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) {
    self.name = name;
    self.description = description;
    self.start_date = start_date;
    self.end_date = end_date;
    self.touch();
  }

  pub fn set_status(&mut self, status: ProjectStatus) {
    self.status = status;
    self.touch();
  }

  /// Returns false when the email was already a member
  pub fn add_member(&mut self, email: &str) -> bool {
    if self.has_member(email) {
      return false;
    }
    self.members.push(email.to_lowercase());
    self.touch();
    true
  }

  pub fn remove_member(&mut self, email: &str) {
    self.members.retain(|m| !m.eq_ignore_ascii_case(email));
    self.touch();
  }

  /// Returns false when the email was already a supervisor
  pub fn add_supervisor(&mut self, email: &str) -> bool {
    if self.has_supervisor(email) {
      return false;
    }
    self.supervisors.push(email.to_lowercase());
    self.touch();
    true
  }

  pub fn remove_supervisor(&mut self, email: &str) {
    self.supervisors.retain(|s| !s.eq_ignore_ascii_case(email));
    self.touch();
  }

  /// Returns false when the email was already listed
  pub fn add_to(&mut self, roster: Roster, email: &str) -> bool {
    match roster {
      Roster::Members => self.add_member(email),
      Roster::Supervisors => self.add_supervisor(email),
    }
  }

  pub fn remove_from(&mut self, roster: Roster, email: &str) {
    match roster {
      Roster::Members => self.remove_member(email),
      Roster::Supervisors => self.remove_supervisor(email),
    }
  }

  pub fn link(&self) -> String {
    format!("/projects/{}", self.id)
  }

  fn touch(&mut self) {
    self.updated_at = Utc::now();
  }
}

pub fn default_end_date(start_date: NaiveDate) -> NaiveDate {
  start_date
    .checked_add_months(Months::new(1))
    .unwrap_or(start_date)
}

/// Project objective ("MT n" column of the one-page matrix)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
  pub id: Uuid,
  pub project_id: Uuid,
  pub content: String,
  pub created_at: DateTime<Utc>,
}

impl Objective {
  pub fn new(project_id: Uuid, content: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      project_id,
      content,
      created_at: Utc::now(),
    }
  }
}

/// Major work item grouping tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorItem {
  pub id: Uuid,
  pub project_id: Uuid,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

impl MajorItem {
  pub fn new(project_id: Uuid, name: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      project_id,
      name,
      created_at: Utc::now(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
  Pending,
  InProgress,
  Done,
}

impl TaskStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      TaskStatus::Pending => "PENDING",
      TaskStatus::InProgress => "IN_PROGRESS",
      TaskStatus::Done => "DONE",
    }
  }

  pub fn from_str(s: &str) -> Result<Self, ProjectError> {
    match s.to_uppercase().as_str() {
      "PENDING" => Ok(TaskStatus::Pending),
      "IN_PROGRESS" => Ok(TaskStatus::InProgress),
      "DONE" => Ok(TaskStatus::Done),
      other => Err(ValidationError::InvalidStatus(other.to_string()).into()),
    }
  }

  /// Done flips back to pending; anything else becomes done
  pub fn toggled(self) -> Self {
    match self {
      TaskStatus::Done => TaskStatus::Pending,
      TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Done,
    }
  }
}

/// Task ("minor item") under a major item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
  pub id: Uuid,
  pub project_id: Uuid,
  pub major_item_id: Uuid,
  pub minor_item: String,
  pub deadline: NaiveDate,
  /// Email of the main responsible person
  pub main_resp: Option<String>,
  /// Email of the secondary responsible person
  pub sub_resp: Option<String>,
  pub status: TaskStatus,
  pub objective_ids: Vec<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Field values shared by task creation and update
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDetails {
  pub major_item_id: Uuid,
  pub minor_item: String,
  pub deadline: NaiveDate,
  pub main_resp: Option<String>,
  pub sub_resp: Option<String>,
  pub objective_ids: Vec<Uuid>,
}

impl Task {
  pub fn new(project_id: Uuid, details: TaskDetails) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      project_id,
      major_item_id: details.major_item_id,
      minor_item: details.minor_item,
      deadline: details.deadline,
      main_resp: details.main_resp,
      sub_resp: details.sub_resp,
      status: TaskStatus::Pending,
      objective_ids: details.objective_ids,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn apply(&mut self, details: TaskDetails) {
    self.major_item_id = details.major_item_id;
    self.minor_item = details.minor_item;
    self.deadline = details.deadline;
    self.main_resp = details.main_resp;
    self.sub_resp = details.sub_resp;
    self.objective_ids = details.objective_ids;
    self.updated_at = Utc::now();
  }

  pub fn set_status(&mut self, status: TaskStatus) {
    self.status = status;
    self.updated_at = Utc::now();
  }

  pub fn is_assigned_to(&self, email: &str) -> bool {
    self
      .main_resp
      .as_deref()
      .is_some_and(|resp| resp.eq_ignore_ascii_case(email))
  }

  pub fn is_done(&self) -> bool {
    self.status == TaskStatus::Done
  }

  /// Past its deadline and not done yet
  pub fn is_overdue(&self, today: NaiveDate) -> bool {
    self.deadline < today && !self.is_done()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostKind {
  Income,
  Expense,
}

impl CostKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      CostKind::Income => "INCOME",
      CostKind::Expense => "EXPENSE",
    }
  }

  pub fn from_str(s: &str) -> Result<Self, ProjectError> {
    match s.to_uppercase().as_str() {
      "INCOME" => Ok(CostKind::Income),
      "EXPENSE" => Ok(CostKind::Expense),
      other => Err(ValidationError::InvalidCostKind(other.to_string()).into()),
    }
  }
}

/// Budget line: money in or out of the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
  pub id: Uuid,
  pub project_id: Uuid,
  pub description: String,
  pub amount: Decimal,
  pub kind: CostKind,
  pub created_at: DateTime<Utc>,
}

impl Cost {
  pub fn new(project_id: Uuid, description: String, amount: Decimal, kind: CostKind) -> Self {
    Self {
      id: Uuid::new_v4(),
      project_id,
      description,
      amount,
      kind,
      created_at: Utc::now(),
    }
  }
}

/// Pending request from a user to join a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
  pub id: Uuid,
  pub project_id: Uuid,
  pub user_email: String,
  pub created_at: DateTime<Utc>,
}

impl JoinRequest {
  pub fn new(project_id: Uuid, user_email: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      project_id,
      user_email,
      created_at: Utc::now(),
    }
  }
}

/// Leader's answer to a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinDecision {
  Accept,
  Reject,
}

impl JoinDecision {
  pub fn from_str(s: &str) -> Result<Self, ProjectError> {
    match s.to_uppercase().as_str() {
      "ACCEPT" => Ok(JoinDecision::Accept),
      "REJECT" => Ok(JoinDecision::Reject),
      other => Err(ValidationError::InvalidDecision(other.to_string()).into()),
    }
  }
}

/// A project with every child record, as loaded for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAggregate {
  pub project: Project,
  pub objectives: Vec<Objective>,
  pub major_items: Vec<MajorItem>,
  pub tasks: Vec<Task>,
  pub costs: Vec<Cost>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn actor(email: &str) -> Actor {
    Actor {
      id: Uuid::new_v4(),
      email: email.to_string(),
      display_name: email.to_string(),
    }
  }

  #[test]
  fn test_new_project_defaults() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let project = Project::new("Alpha".into(), None, Some(start), None, Uuid::new_v4());

    assert_eq!(project.status, ProjectStatus::Ongoing);
    assert!(project.members.is_empty());
    assert!(project.supervisors.is_empty());
    // Month arithmetic clamps to the last day of February
    assert_eq!(
      project.end_date,
      NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
    );
  }

  #[test]
  fn test_permissions() {
    let leader = actor("lead@x.io");
    let mut project = Project::new("Alpha".into(), None, None, None, leader.id);
    project.add_member("dev@x.io");
    project.add_supervisor("boss@x.io");

    let p = project.permissions_for(&leader);
    assert!(p.is_leader && p.is_member && p.can_edit());
    assert_eq!(p.role(), Some(ProjectRole::Leader));

    let p = project.permissions_for(&actor("DEV@x.io"));
    assert!(!p.is_leader && p.is_member && p.can_view());
    assert_eq!(p.role(), Some(ProjectRole::Member));

    let p = project.permissions_for(&actor("boss@x.io"));
    assert!(p.can_view() && !p.can_edit());
    assert_eq!(p.role(), Some(ProjectRole::Supervisor));

    let p = project.permissions_for(&actor("stranger@x.io"));
    assert!(!p.can_view());
    assert_eq!(p.role(), None);
  }

  #[test]
  fn test_member_list_has_no_duplicates() {
    let mut project = Project::new("Alpha".into(), None, None, None, Uuid::new_v4());
    assert!(project.add_member("Dev@X.io"));
    assert!(!project.add_member("dev@x.io"));
    assert_eq!(project.members, vec!["dev@x.io".to_string()]);

    project.remove_member("DEV@x.io");
    assert!(project.members.is_empty());
  }

  #[test]
  fn test_task_status_toggle() {
    assert_eq!(TaskStatus::Done.toggled(), TaskStatus::Pending);
    assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Done);
    assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Done);
  }

  #[test]
  fn test_task_overdue() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let mut task = Task::new(
      Uuid::new_v4(),
      TaskDetails {
        major_item_id: Uuid::new_v4(),
        minor_item: "Draft".into(),
        deadline: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
        main_resp: Some("dev@x.io".into()),
        sub_resp: None,
        objective_ids: vec![],
      },
    );

    assert!(task.is_overdue(today));
    assert!(task.is_assigned_to("DEV@x.io"));

    task.set_status(TaskStatus::Done);
    assert!(!task.is_overdue(today));

    task.set_status(TaskStatus::Pending);
    task.deadline = today;
    assert!(!task.is_overdue(today));
  }

  #[test]
  fn test_enum_parsing() {
    assert_eq!(TaskStatus::from_str("in_progress").unwrap(), TaskStatus::InProgress);
    assert!(TaskStatus::from_str("later").is_err());
    assert_eq!(CostKind::from_str("income").unwrap(), CostKind::Income);
    assert!(CostKind::from_str("refund").is_err());
    assert_eq!(JoinDecision::from_str("Accept").unwrap(), JoinDecision::Accept);
    assert!(JoinDecision::from_str("maybe").is_err());
    assert_eq!(ProjectStatus::from_str("completed").unwrap(), ProjectStatus::Completed);
  }
}
