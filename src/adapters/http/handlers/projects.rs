use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    CreateCostRequest, CreateMajorItemRequest, CreateObjectiveRequest, CreateProjectRequest,
    ListProjectsQuery, SuccessResponse, UpdateProjectRequest,
  },
  errors::ApiError,
  handlers::get_actor,
};
use crate::application::project::{
  CreateCostCommand, CreateCostUseCase, CreateMajorItemCommand, CreateMajorItemUseCase,
  CreateObjectiveCommand, CreateObjectiveUseCase, CreateProjectCommand, CreateProjectUseCase,
  DeleteProjectCommand, DeleteProjectItemCommand, DeleteProjectItemUseCase, DeleteProjectUseCase,
  FinishProjectCommand, FinishProjectUseCase, GetProjectDetailsCommand, GetProjectDetailsUseCase,
  ListProjectsCommand, ListProjectsUseCase, ProjectItem, UpdateProjectCommand,
  UpdateProjectUseCase,
};

/// GET /api/v1/projects
pub async fn list_projects_handler(
  req: HttpRequest,
  query: web::Query<ListProjectsQuery>,
  use_case: web::Data<Arc<ListProjectsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  let query = query.into_inner();

  let listing = use_case
    .execute(ListProjectsCommand {
      actor,
      search: query.search,
      status: query.status,
      role: query.role,
    })
    .await?;

  Ok(HttpResponse::Ok().json(listing))
}

/// POST /api/v1/projects
pub async fn create_project_handler(
  req: HttpRequest,
  body: web::Json<CreateProjectRequest>,
  use_case: web::Data<Arc<CreateProjectUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;
  let body = body.into_inner();

  let project = use_case
    .execute(CreateProjectCommand {
      actor,
      name: body.name,
      description: body.description,
      start_date: body.start_date,
      end_date: body.end_date,
    })
    .await?;

  Ok(HttpResponse::Created().json(project))
}

/// GET /api/v1/projects/{id}
pub async fn get_project_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetProjectDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;

  let details = use_case
    .execute(GetProjectDetailsCommand {
      actor,
      project_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(details))
}

/// PUT /api/v1/projects/{id}
pub async fn update_project_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Json<UpdateProjectRequest>,
  use_case: web::Data<Arc<UpdateProjectUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;
  let body = body.into_inner();

  let project = use_case
    .execute(UpdateProjectCommand {
      actor,
      project_id: path.into_inner(),
      name: body.name,
      description: body.description,
      start_date: body.start_date,
      end_date: body.end_date,
    })
    .await?;

  Ok(HttpResponse::Ok().json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete_project_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteProjectUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  let project_id = path.into_inner();

  use_case
    .execute(DeleteProjectCommand { actor, project_id })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Project deleted".to_string(),
  }))
}

/// POST /api/v1/projects/{id}/finish
pub async fn finish_project_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<FinishProjectUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;

  let project = use_case
    .execute(FinishProjectCommand {
      actor,
      project_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(project))
}

/// POST /api/v1/projects/{id}/objectives
pub async fn create_objective_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Json<CreateObjectiveRequest>,
  use_case: web::Data<Arc<CreateObjectiveUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;

  let objective = use_case
    .execute(CreateObjectiveCommand {
      actor,
      project_id: path.into_inner(),
      content: body.into_inner().content,
    })
    .await?;

  Ok(HttpResponse::Created().json(objective))
}

/// POST /api/v1/projects/{id}/major-items
pub async fn create_major_item_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Json<CreateMajorItemRequest>,
  use_case: web::Data<Arc<CreateMajorItemUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;

  let major_item = use_case
    .execute(CreateMajorItemCommand {
      actor,
      project_id: path.into_inner(),
      name: body.into_inner().name,
    })
    .await?;

  Ok(HttpResponse::Created().json(major_item))
}

/// POST /api/v1/projects/{id}/costs
pub async fn create_cost_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Json<CreateCostRequest>,
  use_case: web::Data<Arc<CreateCostUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;
  let body = body.into_inner();

  let cost = use_case
    .execute(CreateCostCommand {
      actor,
      project_id: path.into_inner(),
      description: body.description,
      amount: body.amount,
      kind: body.kind,
    })
    .await?;

  Ok(HttpResponse::Created().json(cost))
}

async fn delete_item(
  req: &HttpRequest,
  (project_id, item_id): (Uuid, Uuid),
  item: ProjectItem,
  use_case: &DeleteProjectItemUseCase,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(req)?;

  use_case
    .execute(DeleteProjectItemCommand {
      actor,
      project_id,
      item,
      item_id,
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/v1/projects/{id}/objectives/{oid}
pub async fn delete_objective_handler(
  req: HttpRequest,
  path: web::Path<(Uuid, Uuid)>,
  use_case: web::Data<Arc<DeleteProjectItemUseCase>>,
) -> Result<HttpResponse, ApiError> {
  delete_item(&req, path.into_inner(), ProjectItem::Objective, &use_case).await
}

/// DELETE /api/v1/projects/{id}/major-items/{mid}
pub async fn delete_major_item_handler(
  req: HttpRequest,
  path: web::Path<(Uuid, Uuid)>,
  use_case: web::Data<Arc<DeleteProjectItemUseCase>>,
) -> Result<HttpResponse, ApiError> {
  delete_item(&req, path.into_inner(), ProjectItem::MajorItem, &use_case).await
}

/// DELETE /api/v1/projects/{id}/costs/{cid}
pub async fn delete_cost_handler(
  req: HttpRequest,
  path: web::Path<(Uuid, Uuid)>,
  use_case: web::Data<Arc<DeleteProjectItemUseCase>>,
) -> Result<HttpResponse, ApiError> {
  delete_item(&req, path.into_inner(), ProjectItem::Cost, &use_case).await
}

/// DELETE /api/v1/projects/{id}/tasks/{tid}
pub async fn delete_task_handler(
  req: HttpRequest,
  path: web::Path<(Uuid, Uuid)>,
  use_case: web::Data<Arc<DeleteProjectItemUseCase>>,
) -> Result<HttpResponse, ApiError> {
  delete_item(&req, path.into_inner(), ProjectItem::Task, &use_case).await
}
