use actix_web::web;
use std::sync::Arc;

use crate::application::assistant::AskAssistantUseCase;
use crate::application::auth::{LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase};
use crate::application::notification::{
  ListNotificationsUseCase, MarkAllNotificationsReadUseCase, MarkNotificationReadUseCase,
};
use crate::application::project::{
  CreateCostUseCase, CreateMajorItemUseCase, CreateObjectiveUseCase, CreateProjectUseCase,
  CreateTaskUseCase, DeleteProjectItemUseCase, DeleteProjectUseCase, FinishProjectUseCase,
  GetProjectDetailsUseCase, ListProjectsUseCase, ListTasksUseCase, ToggleTaskStatusUseCase,
  UpdateProjectUseCase, UpdateTaskUseCase,
};
use crate::application::team::{
  GetTeamUseCase, HandleJoinRequestUseCase, InviteTeamMemberUseCase, RemoveTeamMemberUseCase,
  RequestToJoinUseCase,
};

use super::handlers::assistant::chat_handler;
use super::handlers::auth::{
  get_current_user_handler, login_handler, logout_handler, register_handler,
};
use super::handlers::notifications::{
  list_notifications_handler, mark_all_notifications_read_handler,
  mark_notification_read_handler,
};
use super::handlers::projects::{
  create_cost_handler, create_major_item_handler, create_objective_handler,
  create_project_handler, delete_cost_handler, delete_major_item_handler,
  delete_objective_handler, delete_project_handler, delete_task_handler, finish_project_handler,
  get_project_handler, list_projects_handler, update_project_handler,
};
use super::handlers::tasks::{
  create_task_handler, list_tasks_handler, toggle_task_status_handler, update_task_handler,
};
use super::handlers::team::{
  get_team_handler, handle_join_request_handler, invite_member_handler,
  invite_supervisor_handler, remove_member_handler, remove_supervisor_handler,
  request_to_join_handler,
};

/// Configure authentication routes
///
/// # Routes
///
/// - POST /register - Register a new user account
/// - POST /login - Authenticate and create a session
/// - POST /logout - Invalidate the current session
/// - GET /me - Current user; expects `AuthMiddleware` on the resource
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  logout_use_case: Arc<LogoutUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(logout_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/logout", web::post().to(logout_handler));
}

/// Route for the signed-in user's profile, mounted behind `AuthMiddleware`
pub fn configure_me_route(cfg: &mut web::ServiceConfig) {
  cfg.route("", web::get().to(get_current_user_handler));
}

/// Use cases served under /api/v1/projects
#[derive(Clone)]
pub struct ProjectRouteDependencies {
  pub list_projects: Arc<ListProjectsUseCase>,
  pub create_project: Arc<CreateProjectUseCase>,
  pub get_project_details: Arc<GetProjectDetailsUseCase>,
  pub update_project: Arc<UpdateProjectUseCase>,
  pub delete_project: Arc<DeleteProjectUseCase>,
  pub finish_project: Arc<FinishProjectUseCase>,
  pub create_objective: Arc<CreateObjectiveUseCase>,
  pub create_major_item: Arc<CreateMajorItemUseCase>,
  pub create_cost: Arc<CreateCostUseCase>,
  pub delete_item: Arc<DeleteProjectItemUseCase>,
  pub list_tasks: Arc<ListTasksUseCase>,
  pub create_task: Arc<CreateTaskUseCase>,
  pub update_task: Arc<UpdateTaskUseCase>,
  pub toggle_task_status: Arc<ToggleTaskStatusUseCase>,
  pub get_team: Arc<GetTeamUseCase>,
  pub request_to_join: Arc<RequestToJoinUseCase>,
  pub handle_join_request: Arc<HandleJoinRequestUseCase>,
  pub invite_team_member: Arc<InviteTeamMemberUseCase>,
  pub remove_team_member: Arc<RemoveTeamMemberUseCase>,
}

/// Configure project, task and team routes
///
/// # Routes
///
/// - GET / - Projects visible to the caller, with filters and stats
/// - POST / - Create a project
/// - POST /join - Ask to join a project by id
/// - GET|PUT|DELETE /{id} - Project details, edit, delete
/// - POST /{id}/finish - Mark completed once every task is done
/// - POST /{id}/objectives, /{id}/major-items, /{id}/costs - Add sub-items
/// - DELETE /{id}/objectives/{oid}, /{id}/major-items/{mid}, /{id}/costs/{cid}
/// - GET|POST /{id}/tasks - Task board and task creation
/// - PUT|DELETE /{id}/tasks/{tid}
/// - POST /{id}/tasks/{tid}/status - Toggle or set task status
/// - GET /{id}/team - Leader, members and supervisors
/// - POST /{id}/join-requests/{rid} - Accept or reject a join request
/// - POST /{id}/members, /{id}/supervisors - Invite by email
/// - DELETE /{id}/members/{email}, /{id}/supervisors/{email}
pub fn configure_project_routes(cfg: &mut web::ServiceConfig, deps: ProjectRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.list_projects))
    .app_data(web::Data::new(deps.create_project))
    .app_data(web::Data::new(deps.get_project_details))
    .app_data(web::Data::new(deps.update_project))
    .app_data(web::Data::new(deps.delete_project))
    .app_data(web::Data::new(deps.finish_project))
    .app_data(web::Data::new(deps.create_objective))
    .app_data(web::Data::new(deps.create_major_item))
    .app_data(web::Data::new(deps.create_cost))
    .app_data(web::Data::new(deps.delete_item))
    .app_data(web::Data::new(deps.list_tasks))
    .app_data(web::Data::new(deps.create_task))
    .app_data(web::Data::new(deps.update_task))
    .app_data(web::Data::new(deps.toggle_task_status))
    .app_data(web::Data::new(deps.get_team))
    .app_data(web::Data::new(deps.request_to_join))
    .app_data(web::Data::new(deps.handle_join_request))
    .app_data(web::Data::new(deps.invite_team_member))
    .app_data(web::Data::new(deps.remove_team_member))
    // Static segments before `/{id}`
    .route("/join", web::post().to(request_to_join_handler))
    .route("", web::get().to(list_projects_handler))
    .route("", web::post().to(create_project_handler))
    .route("/{id}", web::get().to(get_project_handler))
    .route("/{id}", web::put().to(update_project_handler))
    .route("/{id}", web::delete().to(delete_project_handler))
    .route("/{id}/finish", web::post().to(finish_project_handler))
    .route("/{id}/objectives", web::post().to(create_objective_handler))
    .route(
      "/{id}/objectives/{item_id}",
      web::delete().to(delete_objective_handler),
    )
    .route("/{id}/major-items", web::post().to(create_major_item_handler))
    .route(
      "/{id}/major-items/{item_id}",
      web::delete().to(delete_major_item_handler),
    )
    .route("/{id}/costs", web::post().to(create_cost_handler))
    .route(
      "/{id}/costs/{item_id}",
      web::delete().to(delete_cost_handler),
    )
    .route("/{id}/tasks", web::get().to(list_tasks_handler))
    .route("/{id}/tasks", web::post().to(create_task_handler))
    .route("/{id}/tasks/{task_id}", web::put().to(update_task_handler))
    .route(
      "/{id}/tasks/{task_id}",
      web::delete().to(delete_task_handler),
    )
    .route(
      "/{id}/tasks/{task_id}/status",
      web::post().to(toggle_task_status_handler),
    )
    .route("/{id}/team", web::get().to(get_team_handler))
    .route(
      "/{id}/join-requests/{request_id}",
      web::post().to(handle_join_request_handler),
    )
    .route("/{project_id}/members", web::post().to(invite_member_handler))
    .route(
      "/{project_id}/members/{email}",
      web::delete().to(remove_member_handler),
    )
    .route(
      "/{project_id}/supervisors",
      web::post().to(invite_supervisor_handler),
    )
    .route(
      "/{project_id}/supervisors/{email}",
      web::delete().to(remove_supervisor_handler),
    );
}

/// Configure notification routes
///
/// # Routes
///
/// - GET / - Recent notifications and unread count
/// - POST /read-all - Mark every notification read
/// - POST /{id}/read - Mark one notification read
pub fn configure_notification_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListNotificationsUseCase>,
  mark_read_use_case: Arc<MarkNotificationReadUseCase>,
  mark_all_read_use_case: Arc<MarkAllNotificationsReadUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(mark_read_use_case))
    .app_data(web::Data::new(mark_all_read_use_case))
    .route("", web::get().to(list_notifications_handler))
    .route(
      "/read-all",
      web::post().to(mark_all_notifications_read_handler),
    )
    .route("/{id}/read", web::post().to(mark_notification_read_handler));
}

/// Configure assistant routes
///
/// # Routes
///
/// - POST /chat - One assistant turn
pub fn configure_assistant_routes(
  cfg: &mut web::ServiceConfig,
  ask_use_case: Arc<AskAssistantUseCase>,
) {
  cfg
    .app_data(web::Data::new(ask_use_case))
    .route("/chat", web::post().to(chat_handler));
}
