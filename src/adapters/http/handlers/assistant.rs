use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ChatRequest, ChatResponse},
  errors::ApiError,
  handlers::get_user,
};
use crate::application::assistant::{AskAssistantCommand, AskAssistantUseCase};

/// POST /api/v1/assistant/chat
pub async fn chat_handler(
  req: HttpRequest,
  body: web::Json<ChatRequest>,
  use_case: web::Data<Arc<AskAssistantUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  body.validate()?;
  let body = body.into_inner();

  tracing::debug!(
    user_id = %user.id,
    history = body.history.len(),
    "Assistant chat request"
  );

  let response = use_case
    .execute(AskAssistantCommand {
      message: body.message,
      history: body.history,
    })
    .await?;

  Ok(HttpResponse::Ok().json(ChatResponse {
    reply: response.reply,
  }))
}
