pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use dtos::{ErrorResponse, SuccessResponse};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{AuthMiddleware, RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{
  ProjectRouteDependencies, configure_assistant_routes, configure_auth_routes,
  configure_me_route, configure_notification_routes, configure_project_routes,
};
