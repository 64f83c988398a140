use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::{
  dtos::{MarkAllReadResponse, SuccessResponse},
  errors::ApiError,
  handlers::get_user,
};
use crate::application::notification::{
  ListNotificationsUseCase, MarkAllNotificationsReadUseCase, MarkNotificationReadCommand,
  MarkNotificationReadUseCase,
};

/// GET /api/v1/notifications
///
/// Newest first together with the unread count; clients poll this endpoint.
pub async fn list_notifications_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<ListNotificationsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let feed = use_case.execute(user.id).await?;

  Ok(HttpResponse::Ok().json(feed))
}

/// POST /api/v1/notifications/{id}/read
pub async fn mark_notification_read_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<MarkNotificationReadUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  use_case
    .execute(MarkNotificationReadCommand {
      user_id: user.id,
      notification_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Notification marked as read".to_string(),
  }))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_notifications_read_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<MarkAllNotificationsReadUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let updated = use_case.execute(user.id).await?;

  Ok(HttpResponse::Ok().json(MarkAllReadResponse { updated }))
}
