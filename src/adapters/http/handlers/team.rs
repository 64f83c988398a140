use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    InviteRequest, JoinProjectRequest, JoinRequestActionRequest, SuccessResponse, TeamMemberPath,
    TeamResponse,
  },
  errors::ApiError,
  handlers::get_actor,
};
use crate::application::team::{
  GetTeamCommand, GetTeamUseCase, HandleJoinRequestCommand, HandleJoinRequestUseCase,
  InviteTeamMemberCommand, InviteTeamMemberUseCase, RemoveTeamMemberCommand,
  RemoveTeamMemberUseCase, RequestToJoinCommand, RequestToJoinUseCase, TeamRole,
};

/// GET /api/v1/projects/{id}/team
pub async fn get_team_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetTeamUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;

  let members = use_case
    .execute(GetTeamCommand {
      actor,
      project_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(TeamResponse { members }))
}

/// POST /api/v1/projects/join
pub async fn request_to_join_handler(
  req: HttpRequest,
  body: web::Json<JoinProjectRequest>,
  use_case: web::Data<Arc<RequestToJoinUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  body.validate()?;

  let join_request = use_case
    .execute(RequestToJoinCommand {
      actor,
      project_id: body.into_inner().project_id,
    })
    .await?;

  tracing::info!(
    project_id = %join_request.project_id,
    request_id = %join_request.id,
    "Join request submitted"
  );

  Ok(HttpResponse::Created().json(join_request))
}

/// POST /api/v1/projects/{id}/join-requests/{rid}
pub async fn handle_join_request_handler(
  req: HttpRequest,
  path: web::Path<(Uuid, Uuid)>,
  body: web::Json<JoinRequestActionRequest>,
  use_case: web::Data<Arc<HandleJoinRequestUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(&req)?;
  let (project_id, request_id) = path.into_inner();

  use_case
    .execute(HandleJoinRequestCommand {
      actor,
      project_id,
      request_id,
      action: body.into_inner().action,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Join request processed".to_string(),
  }))
}

async fn invite(
  req: &HttpRequest,
  project_id: Uuid,
  body: InviteRequest,
  role: TeamRole,
  use_case: &InviteTeamMemberUseCase,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(req)?;
  body.validate()?;

  let project = use_case
    .execute(InviteTeamMemberCommand {
      actor,
      project_id,
      email: body.email,
      role,
    })
    .await?;

  Ok(HttpResponse::Ok().json(project))
}

async fn remove(
  req: &HttpRequest,
  path: TeamMemberPath,
  role: TeamRole,
  use_case: &RemoveTeamMemberUseCase,
) -> Result<HttpResponse, ApiError> {
  let actor = get_actor(req)?;

  let project = use_case
    .execute(RemoveTeamMemberCommand {
      actor,
      project_id: path.project_id,
      email: path.email,
      role,
    })
    .await?;

  Ok(HttpResponse::Ok().json(project))
}

/// POST /api/v1/projects/{id}/members
pub async fn invite_member_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Json<InviteRequest>,
  use_case: web::Data<Arc<InviteTeamMemberUseCase>>,
) -> Result<HttpResponse, ApiError> {
  invite(
    &req,
    path.into_inner(),
    body.into_inner(),
    TeamRole::Member,
    &use_case,
  )
  .await
}

/// POST /api/v1/projects/{id}/supervisors
pub async fn invite_supervisor_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Json<InviteRequest>,
  use_case: web::Data<Arc<InviteTeamMemberUseCase>>,
) -> Result<HttpResponse, ApiError> {
  invite(
    &req,
    path.into_inner(),
    body.into_inner(),
    TeamRole::Supervisor,
    &use_case,
  )
  .await
}

/// DELETE /api/v1/projects/{id}/members/{email}
pub async fn remove_member_handler(
  req: HttpRequest,
  path: web::Path<TeamMemberPath>,
  use_case: web::Data<Arc<RemoveTeamMemberUseCase>>,
) -> Result<HttpResponse, ApiError> {
  remove(&req, path.into_inner(), TeamRole::Member, &use_case).await
}

/// DELETE /api/v1/projects/{id}/supervisors/{email}
pub async fn remove_supervisor_handler(
  req: HttpRequest,
  path: web::Path<TeamMemberPath>,
  use_case: web::Data<Arc<RemoveTeamMemberUseCase>>,
) -> Result<HttpResponse, ApiError> {
  remove(&req, path.into_inner(), TeamRole::Supervisor, &use_case).await
}
