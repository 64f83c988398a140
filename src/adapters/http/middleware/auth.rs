use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::auth::GetCurrentUserUseCase,
  domain::auth::entities::User,
};

/// Validates the Bearer session token and attaches the `User` to request extensions
///
/// For every request the middleware:
/// 1. Reads the token from `Authorization: Bearer <token>`
/// 2. Resolves it with `GetCurrentUserUseCase`
/// 3. Inserts the `User` (without password hash) into request extensions
///
/// Requests without a valid, unexpired session are answered with 401 before
/// reaching the wrapped service.
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use oppm::application::auth::GetCurrentUserUseCase;
/// # use oppm::adapters::http::middleware::AuthMiddleware;
///
/// # async fn example(get_user_use_case: Arc<GetCurrentUserUseCase>) {
/// let app = App::new().service(
///   web::scope("/api/v1/projects")
///     .wrap(AuthMiddleware::new(get_user_use_case))
///     .route("", web::get().to(|| async { "Projects" })),
/// );
/// # }
/// ```
pub struct AuthMiddleware {
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl AuthMiddleware {
  /// Creates a new authentication middleware
  ///
  /// # Arguments
  ///
  /// * `get_user_use_case` - Resolves a session token to its user
  pub fn new(get_user_use_case: Arc<GetCurrentUserUseCase>) -> Self {
    Self { get_user_use_case }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      get_user_use_case: self.get_user_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let get_user_use_case = self.get_user_use_case.clone();

    Box::pin(async move {
      let session_token = match extract_session_token(&req) {
        Ok(token) => token,
        Err(e) => return Ok(reject(req, e)),
      };

      let current = match get_user_use_case.execute(session_token).await {
        Ok(response) => response,
        Err(e) => return Ok(reject(req, e.into())),
      };

      // Password hash is never needed past this point
      let user = User::from_db(
        current.user_id,
        current.email,
        current.first_name,
        String::new(),
        current.created_at,
        current.created_at,
      );
      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
  let (request, _) = req.into_parts();
  let response = error.error_response().map_into_right_body();
  ServiceResponse::new(request, response)
}

/// Extract session token from Authorization header
///
/// # Errors
///
/// Returns `AuthErrorKind::InvalidToken` when the header is missing, not a
/// Bearer credential, or blank
pub(crate) fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}
