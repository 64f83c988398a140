use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ListTasksQuery, TaskListResponse, TaskRequest, TaskStatusRequest, TaskStatusResponse},
  errors::ApiError,
  handlers::get_actor,
};
use crate::application::project::{
  CreateTaskCommand, CreateTaskUseCase, ListTasksCommand, ListTasksUseCase, TaskFields,
  ToggleTaskStatusCommand, ToggleTaskStatusUseCase, UpdateTaskCommand, UpdateTaskUseCase,
};
use crate::domain::project::TaskQuery;

impl From<TaskRequest> for TaskFields {
  fn from(request: TaskRequest) -> Self {
    Self {
      major_item_id: request.major_item_id,
      minor_item: request.minor_item,
      deadline: request.deadline,
      main_resp: request.main_resp,
      sub_resp: request.sub_resp,
      objective_ids: request.objective_ids,
    }
  }
}

/// GET /api/v1/projects/{id}/tasks
pub async fn list_tasks_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  query: web::Query<ListTasksQuery>,
  use_case: web::Data<Arc<ListTasksUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  let query = query.into_inner();

  let response = use_case
    .execute(ListTasksCommand {
      actor,
      project_id: path.into_inner(),
      query: TaskQuery {
        major_item_id: query.major_item_id,
        sort: query.sort,
        group_by: query.group_by,
      },
    })
    .await?;

  Ok(HttpResponse::Ok().json(TaskListResponse {
    groups: response.groups,
    total: response.total,
  }))
}

/// POST /api/v1/projects/{id}/tasks
pub async fn create_task_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Json<TaskRequest>,
  use_case: web::Data<Arc<CreateTaskUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;

  let task = use_case
    .execute(CreateTaskCommand {
      actor,
      project_id: path.into_inner(),
      fields: body.into_inner().into(),
    })
    .await?;

  Ok(HttpResponse::Created().json(task))
}

/// PUT /api/v1/projects/{id}/tasks/{tid}
pub async fn update_task_handler(
  req: HttpRequest,
  path: web::Path<(Uuid, Uuid)>,
  body: web::Json<TaskRequest>,
  use_case: web::Data<Arc<UpdateTaskUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;
  let (project_id, task_id) = path.into_inner();

  let task = use_case
    .execute(UpdateTaskCommand {
      actor,
      project_id,
      task_id,
      fields: body.into_inner().into(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(task))
}

/// POST /api/v1/projects/{id}/tasks/{tid}/status
///
/// The body is optional; an empty body toggles between done and pending.
pub async fn toggle_task_status_handler(
  req: HttpRequest,
  path: web::Path<(Uuid, Uuid)>,
  body: Option<web::Json<TaskStatusRequest>>,
  use_case: web::Data<Arc<ToggleTaskStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  let (project_id, task_id) = path.into_inner();
  let status = body.and_then(|b| b.into_inner().status);

  let response = use_case
    .execute(ToggleTaskStatusCommand {
      actor,
      project_id,
      task_id,
      status,
    })
    .await?;

  Ok(HttpResponse::Ok().json(TaskStatusResponse {
    task: response.task,
    project_status: response.project_status,
  }))
}
