pub mod cost_repository;
pub mod join_request_repository;
pub mod major_item_repository;
pub mod notification_repository;
pub mod objective_repository;
pub mod project_repository;
pub mod session_repository;
pub mod task_repository;
pub mod user_repository;

pub use cost_repository::PostgresCostRepository;
pub use join_request_repository::PostgresJoinRequestRepository;
pub use major_item_repository::PostgresMajorItemRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use objective_repository::PostgresObjectiveRepository;
pub use project_repository::PostgresProjectRepository;
pub use session_repository::PostgresSessionRepository;
pub use task_repository::PostgresTaskRepository;
pub use user_repository::PostgresUserRepository;
