//! In-memory port implementations for service tests.
//!
//! State lives behind `Mutex` so tests can inspect what services wrote.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::assistant::{AssistantError, ChatCompletionClient, ChatMessage};
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::{SessionRepository, UserRepository};
use crate::domain::auth::value_objects::Email;
use crate::domain::auth::{Session, User};
use crate::domain::notification::{
  Notification, NotificationError, NotificationKind, NotificationRepository, NotificationService,
};
use crate::domain::project::entities::{
  Actor, Cost, JoinRequest, MajorItem, Objective, Project, ProjectAggregate, ProjectStatus, Roster,
  Task, TaskStatus,
};
use crate::domain::project::errors::ProjectError;
use crate::domain::project::ports::{
  CostRepository, JoinRequestRepository, MajorItemRepository, ObjectiveRepository, ProjectCache,
  ProjectRepository, TaskRepository,
};
use crate::domain::project::progress::TaskCounts;
use crate::domain::project::{
  ProjectService, ProjectServiceDependencies, TeamService, TeamServiceDependencies,
};

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds an account without going through registration
  pub fn insert(&self, email: &str, first_name: Option<&str>) -> User {
    let user = User::new(
      email.to_lowercase(),
      "$argon2id$v=19$m=19456,t=2,p=1$unused".to_string(),
      first_name.map(str::to_string),
    );
    self.users.lock().unwrap().push(user.clone());
    user
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    if users.iter().any(|u| u.email == user.email) {
      return Err(RepositoryError::DuplicateKey("users_email_key".into()).into());
    }
    users.push(user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email.as_str())
        .cloned(),
    )
  }

  async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<User>, AuthError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .filter(|u| emails.iter().any(|e| e.eq_ignore_ascii_case(&u.email)))
        .cloned()
        .collect(),
    )
  }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
  sessions: Mutex<Vec<Session>>,
}

impl InMemorySessionRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.sessions.lock().unwrap().len()
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    self.sessions.lock().unwrap().push(session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    Ok(
      self
        .sessions
        .lock()
        .unwrap()
        .iter()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    self.sessions.lock().unwrap().retain(|s| s.id != session_id);
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryNotificationRepository {
  notifications: Mutex<Vec<Notification>>,
  fail_writes: AtomicBool,
}

impl InMemoryNotificationRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insertion order
  pub fn all(&self) -> Vec<Notification> {
    self.notifications.lock().unwrap().clone()
  }

  pub fn for_user(&self, user_id: Uuid) -> Vec<Notification> {
    self
      .all()
      .into_iter()
      .filter(|n| n.user_id == user_id)
      .collect()
  }

  /// Makes every write fail with a connection error
  pub fn fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  fn check_writable(&self) -> Result<(), NotificationError> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(RepositoryError::ConnectionFailed("unavailable".into()).into());
    }
    Ok(())
  }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
  async fn create(&self, notification: Notification) -> Result<Notification, NotificationError> {
    self.check_writable()?;
    self.notifications.lock().unwrap().push(notification.clone());
    Ok(notification)
  }

  async fn find_recent(
    &self,
    user_id: Uuid,
    limit: i64,
  ) -> Result<Vec<Notification>, NotificationError> {
    Ok(
      self
        .notifications
        .lock()
        .unwrap()
        .iter()
        .rev()
        .filter(|n| n.user_id == user_id)
        .take(limit as usize)
        .cloned()
        .collect(),
    )
  }

  async fn count_unread(&self, user_id: Uuid) -> Result<i64, NotificationError> {
    Ok(
      self
        .notifications
        .lock()
        .unwrap()
        .iter()
        .filter(|n| n.user_id == user_id && !n.is_read)
        .count() as i64,
    )
  }

  async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<bool, NotificationError> {
    self.check_writable()?;
    let mut notifications = self.notifications.lock().unwrap();
    match notifications
      .iter_mut()
      .find(|n| n.id == id && n.user_id == user_id)
    {
      Some(n) => {
        n.is_read = true;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, NotificationError> {
    self.check_writable()?;
    let mut changed = 0;
    for n in self.notifications.lock().unwrap().iter_mut() {
      if n.user_id == user_id && !n.is_read {
        n.is_read = true;
        changed += 1;
      }
    }
    Ok(changed)
  }

  async fn mark_join_request_read(
    &self,
    user_id: Uuid,
    request_id: Uuid,
  ) -> Result<u64, NotificationError> {
    self.check_writable()?;
    let mut changed = 0;
    for n in self.notifications.lock().unwrap().iter_mut() {
      if n.user_id == user_id
        && n.kind == NotificationKind::JoinRequest
        && n.request_id == Some(request_id)
        && !n.is_read
      {
        n.is_read = true;
        changed += 1;
      }
    }
    Ok(changed)
  }
}

// ---------------------------------------------------------------------------
// Projects and their children
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ProjectState {
  projects: Vec<Project>,
  tasks: Vec<Task>,
  objectives: Vec<Objective>,
  major_items: Vec<MajorItem>,
  costs: Vec<Cost>,
  join_requests: Vec<JoinRequest>,
}

/// One store implementing every project port, so cascades behave like the
/// database's foreign keys
#[derive(Default)]
pub struct InMemoryProjectStore {
  state: Mutex<ProjectState>,
}

impl InMemoryProjectStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn project(&self, id: Uuid) -> Option<Project> {
    self
      .state
      .lock()
      .unwrap()
      .projects
      .iter()
      .find(|p| p.id == id)
      .cloned()
  }

  fn modify(
    &self,
    id: Uuid,
    change: impl FnOnce(&mut Project),
  ) -> Result<Project, ProjectError> {
    let mut state = self.state.lock().unwrap();
    let slot = state
      .projects
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or(ProjectError::ProjectNotFound)?;
    change(slot);
    Ok(slot.clone())
  }

  pub fn tasks(&self) -> Vec<Task> {
    self.state.lock().unwrap().tasks.clone()
  }

  pub fn join_requests(&self) -> Vec<JoinRequest> {
    self.state.lock().unwrap().join_requests.clone()
  }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectStore {
  async fn create(&self, project: Project) -> Result<Project, ProjectError> {
    self.state.lock().unwrap().projects.push(project.clone());
    Ok(project)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectError> {
    Ok(self.project(id))
  }

  async fn find_visible_to(
    &self,
    user_id: Uuid,
    email: &str,
  ) -> Result<Vec<Project>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .projects
        .iter()
        .rev()
        .filter(|p| p.owner_id == user_id || p.has_member(email) || p.has_supervisor(email))
        .cloned()
        .collect(),
    )
  }

  async fn update(&self, project: Project) -> Result<Project, ProjectError> {
    self.modify(project.id, |slot| {
      slot.update_info(
        project.name.clone(),
        project.description.clone(),
        project.start_date,
        project.end_date,
      )
    })
  }

  async fn update_status(
    &self,
    id: Uuid,
    status: ProjectStatus,
  ) -> Result<Project, ProjectError> {
    self.modify(id, |slot| slot.set_status(status))
  }

  async fn add_to_roster(
    &self,
    id: Uuid,
    roster: Roster,
    email: &str,
  ) -> Result<Project, ProjectError> {
    self.modify(id, |slot| {
      slot.add_to(roster, email.trim());
    })
  }

  async fn remove_from_roster(
    &self,
    id: Uuid,
    roster: Roster,
    email: &str,
  ) -> Result<Project, ProjectError> {
    self.modify(id, |slot| slot.remove_from(roster, email.trim()))
  }

  async fn delete(&self, id: Uuid) -> Result<(), ProjectError> {
    let mut state = self.state.lock().unwrap();
    state.projects.retain(|p| p.id != id);
    state.tasks.retain(|t| t.project_id != id);
    state.objectives.retain(|o| o.project_id != id);
    state.major_items.retain(|m| m.project_id != id);
    state.costs.retain(|c| c.project_id != id);
    state.join_requests.retain(|r| r.project_id != id);
    Ok(())
  }
}

#[async_trait]
impl TaskRepository for InMemoryProjectStore {
  async fn create(&self, task: Task) -> Result<Task, ProjectError> {
    self.state.lock().unwrap().tasks.push(task.clone());
    Ok(task)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .tasks
        .iter()
        .find(|t| t.id == id)
        .cloned(),
    )
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .tasks
        .iter()
        .filter(|t| t.project_id == project_id)
        .cloned()
        .collect(),
    )
  }

  async fn count_by_projects(
    &self,
    project_ids: &[Uuid],
  ) -> Result<HashMap<Uuid, TaskCounts>, ProjectError> {
    let state = self.state.lock().unwrap();
    let mut counts: HashMap<Uuid, TaskCounts> = HashMap::new();
    for task in state.tasks.iter().filter(|t| project_ids.contains(&t.project_id)) {
      let entry = counts.entry(task.project_id).or_default();
      entry.total += 1;
      if task.is_done() {
        entry.done += 1;
      }
    }
    Ok(counts)
  }

  async fn update(&self, task: Task) -> Result<Task, ProjectError> {
    let mut state = self.state.lock().unwrap();
    let slot = state
      .tasks
      .iter_mut()
      .find(|t| t.id == task.id)
      .ok_or(RepositoryError::NotFound)?;
    *slot = task.clone();
    Ok(task)
  }

  async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<(), ProjectError> {
    let mut state = self.state.lock().unwrap();
    let task = state
      .tasks
      .iter_mut()
      .find(|t| t.id == id)
      .ok_or(RepositoryError::NotFound)?;
    task.set_status(status);
    Ok(())
  }

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError> {
    let mut state = self.state.lock().unwrap();
    let before = state.tasks.len();
    state
      .tasks
      .retain(|t| !(t.id == id && t.project_id == project_id));
    Ok(state.tasks.len() != before)
  }
}

#[async_trait]
impl ObjectiveRepository for InMemoryProjectStore {
  async fn create(&self, objective: Objective) -> Result<Objective, ProjectError> {
    self.state.lock().unwrap().objectives.push(objective.clone());
    Ok(objective)
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Objective>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .objectives
        .iter()
        .filter(|o| o.project_id == project_id)
        .cloned()
        .collect(),
    )
  }

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError> {
    let mut state = self.state.lock().unwrap();
    let before = state.objectives.len();
    state
      .objectives
      .retain(|o| !(o.id == id && o.project_id == project_id));
    let deleted = state.objectives.len() != before;
    if deleted {
      for task in state.tasks.iter_mut() {
        task.objective_ids.retain(|o| *o != id);
      }
    }
    Ok(deleted)
  }
}

#[async_trait]
impl MajorItemRepository for InMemoryProjectStore {
  async fn create(&self, item: MajorItem) -> Result<MajorItem, ProjectError> {
    self.state.lock().unwrap().major_items.push(item.clone());
    Ok(item)
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<MajorItem>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .major_items
        .iter()
        .filter(|m| m.project_id == project_id)
        .cloned()
        .collect(),
    )
  }

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError> {
    let mut state = self.state.lock().unwrap();
    let before = state.major_items.len();
    state
      .major_items
      .retain(|m| !(m.id == id && m.project_id == project_id));
    let deleted = state.major_items.len() != before;
    if deleted {
      state.tasks.retain(|t| t.major_item_id != id);
    }
    Ok(deleted)
  }
}

#[async_trait]
impl CostRepository for InMemoryProjectStore {
  async fn create(&self, cost: Cost) -> Result<Cost, ProjectError> {
    self.state.lock().unwrap().costs.push(cost.clone());
    Ok(cost)
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Cost>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .costs
        .iter()
        .filter(|c| c.project_id == project_id)
        .cloned()
        .collect(),
    )
  }

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError> {
    let mut state = self.state.lock().unwrap();
    let before = state.costs.len();
    state
      .costs
      .retain(|c| !(c.id == id && c.project_id == project_id));
    Ok(state.costs.len() != before)
  }
}

#[async_trait]
impl JoinRequestRepository for InMemoryProjectStore {
  async fn create(&self, request: JoinRequest) -> Result<JoinRequest, ProjectError> {
    let mut state = self.state.lock().unwrap();
    if state
      .join_requests
      .iter()
      .any(|r| r.project_id == request.project_id && r.user_email == request.user_email)
    {
      return Err(RepositoryError::DuplicateKey("join_requests_project_email_key".into()).into());
    }
    state.join_requests.push(request.clone());
    Ok(request)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<JoinRequest>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .join_requests
        .iter()
        .find(|r| r.id == id)
        .cloned(),
    )
  }

  async fn find_by_project_and_email(
    &self,
    project_id: Uuid,
    email: &str,
  ) -> Result<Option<JoinRequest>, ProjectError> {
    Ok(
      self
        .state
        .lock()
        .unwrap()
        .join_requests
        .iter()
        .find(|r| r.project_id == project_id && r.user_email.eq_ignore_ascii_case(email))
        .cloned(),
    )
  }

  async fn delete(&self, id: Uuid) -> Result<(), ProjectError> {
    self
      .state
      .lock()
      .unwrap()
      .join_requests
      .retain(|r| r.id != id);
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryProjectCache {
  entries: Mutex<HashMap<Uuid, ProjectAggregate>>,
  failing: AtomicBool,
}

impl InMemoryProjectCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, project_id: Uuid) -> bool {
    self.entries.lock().unwrap().contains_key(&project_id)
  }

  /// Makes every call fail
  pub fn fail(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  fn check(&self) -> Result<(), RepositoryError> {
    if self.failing.load(Ordering::SeqCst) {
      return Err(RepositoryError::ConnectionFailed("cache down".into()));
    }
    Ok(())
  }
}

#[async_trait]
impl ProjectCache for InMemoryProjectCache {
  async fn get(&self, project_id: Uuid) -> Result<Option<ProjectAggregate>, RepositoryError> {
    self.check()?;
    Ok(self.entries.lock().unwrap().get(&project_id).cloned())
  }

  async fn put(&self, aggregate: &ProjectAggregate) -> Result<(), RepositoryError> {
    self.check()?;
    self
      .entries
      .lock()
      .unwrap()
      .insert(aggregate.project.id, aggregate.clone());
    Ok(())
  }

  async fn invalidate(&self, project_id: Uuid) -> Result<(), RepositoryError> {
    self.check()?;
    self.entries.lock().unwrap().remove(&project_id);
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Chat completion
// ---------------------------------------------------------------------------

/// Returns a canned reply, or an error once, and records requests
pub struct MockChatClient {
  reply: Option<String>,
  error: Mutex<Option<AssistantError>>,
  requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatClient {
  pub fn with_reply(reply: Option<&str>) -> Self {
    Self {
      reply: reply.map(str::to_string),
      error: Mutex::new(None),
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn with_error(error: AssistantError) -> Self {
    Self {
      reply: None,
      error: Mutex::new(Some(error)),
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn last_request(&self) -> Option<Vec<ChatMessage>> {
    self.requests.lock().unwrap().last().cloned()
  }
}

#[async_trait]
impl ChatCompletionClient for MockChatClient {
  async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, AssistantError> {
    self.requests.lock().unwrap().push(messages.to_vec());
    if let Some(error) = self.error.lock().unwrap().take() {
      return Err(error);
    }
    Ok(self.reply.clone())
  }
}

// ---------------------------------------------------------------------------
// Wired services
// ---------------------------------------------------------------------------

/// Project and team services wired to in-memory ports
pub struct ProjectHarness {
  pub store: Arc<InMemoryProjectStore>,
  pub users: Arc<InMemoryUserRepository>,
  pub notifications: Arc<InMemoryNotificationRepository>,
  pub cache: Arc<InMemoryProjectCache>,
  pub notification_service: Arc<NotificationService>,
  pub projects: Arc<ProjectService>,
  pub team: Arc<TeamService>,
}

impl ProjectHarness {
  pub fn new() -> Self {
    let store = Arc::new(InMemoryProjectStore::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let cache = Arc::new(InMemoryProjectCache::new());
    let notification_service = Arc::new(NotificationService::new(
      notifications.clone(),
      users.clone(),
      20,
    ));

    let projects = Arc::new(ProjectService::new(ProjectServiceDependencies {
      project_repo: store.clone(),
      task_repo: store.clone(),
      objective_repo: store.clone(),
      major_item_repo: store.clone(),
      cost_repo: store.clone(),
      user_repo: users.clone(),
      cache: cache.clone(),
      notifications: notification_service.clone(),
    }));
    let team = Arc::new(TeamService::new(TeamServiceDependencies {
      project_repo: store.clone(),
      join_request_repo: store.clone(),
      user_repo: users.clone(),
      cache: cache.clone(),
      notifications: notification_service.clone(),
    }));

    Self {
      store,
      users,
      notifications,
      cache,
      notification_service,
      projects,
      team,
    }
  }

  /// Registers a user and returns them as an actor
  pub fn actor(&self, email: &str, first_name: Option<&str>) -> Actor {
    Actor::from(&self.users.insert(email, first_name))
  }
}
