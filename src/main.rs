use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oppm::{
  adapters::http::{
    AuthMiddleware, ProjectRouteDependencies, RequestIdMiddleware, configure_assistant_routes,
    configure_auth_routes, configure_me_route, configure_notification_routes,
    configure_project_routes,
  },
  application::assistant::AskAssistantUseCase,
  application::auth::{
    GetCurrentUserUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
  },
  application::notification::{
    ListNotificationsUseCase, MarkAllNotificationsReadUseCase, MarkNotificationReadUseCase,
  },
  application::project::{
    CreateCostUseCase, CreateMajorItemUseCase, CreateObjectiveUseCase, CreateProjectUseCase,
    CreateTaskUseCase, DeleteProjectItemUseCase, DeleteProjectUseCase, FinishProjectUseCase,
    GetProjectDetailsUseCase, ListProjectsUseCase, ListTasksUseCase, ToggleTaskStatusUseCase,
    UpdateProjectUseCase, UpdateTaskUseCase,
  },
  application::team::{
    GetTeamUseCase, HandleJoinRequestUseCase, InviteTeamMemberUseCase, RemoveTeamMemberUseCase,
    RequestToJoinUseCase,
  },
  domain::assistant::{AssistantService, ChatCompletionClient},
  domain::auth::services::{AuthService, AuthServiceConfig},
  domain::notification::NotificationService,
  domain::project::{
    ProjectService, ProjectServiceDependencies, TeamService, TeamServiceDependencies,
  },
  infrastructure::{
    assistant::OpenAiChatClient,
    cache::RedisProjectCache,
    config::Config,
    persistence::postgres::{
      PostgresCostRepository, PostgresJoinRequestRepository, PostgresMajorItemRepository,
      PostgresNotificationRepository, PostgresObjectiveRepository, PostgresProjectRepository,
      PostgresSessionRepository, PostgresTaskRepository, PostgresUserRepository,
    },
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "oppm=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting OPPM application");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  // Database
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Could not connect to database")?;

  tracing::info!("Database connection pool created");

  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  // Redis
  tracing::info!("Connecting to Redis");

  let redis_client =
    redis::Client::open(config.redis.url.clone()).context("Invalid Redis URL")?;

  let redis_conn = tokio::time::timeout(
    Duration::from_secs(config.redis.connect_timeout_seconds),
    redis_client.get_connection_manager(),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Redis connection timed out after {} seconds. Is Redis running?",
      config.redis.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Redis connection timed out after {} seconds",
      config.redis.connect_timeout_seconds
    )
  })?
  .context("Could not connect to Redis")?;

  tracing::info!("Redis connection established");

  // Repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let project_repo = Arc::new(PostgresProjectRepository::new(db_pool.clone()));
  let objective_repo = Arc::new(PostgresObjectiveRepository::new(db_pool.clone()));
  let major_item_repo = Arc::new(PostgresMajorItemRepository::new(db_pool.clone()));
  let cost_repo = Arc::new(PostgresCostRepository::new(db_pool.clone()));
  let task_repo = Arc::new(PostgresTaskRepository::new(db_pool.clone()));
  let join_request_repo = Arc::new(PostgresJoinRequestRepository::new(db_pool.clone()));
  let notification_repo = Arc::new(PostgresNotificationRepository::new(db_pool.clone()));
  let project_cache = Arc::new(RedisProjectCache::new(
    redis_conn,
    Duration::from_secs(config.redis.cache_ttl_seconds),
  ));

  // Domain services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().context("Failed to create password hasher")?);

  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    session_repo,
    password_hasher,
    AuthServiceConfig {
      session_duration: chrono::Duration::seconds(config.security.session_ttl_seconds as i64),
    },
  ));

  let notification_service = Arc::new(NotificationService::new(
    notification_repo,
    user_repo.clone(),
    config.notifications.page_size,
  ));

  let project_service = Arc::new(ProjectService::new(ProjectServiceDependencies {
    project_repo: project_repo.clone(),
    task_repo,
    objective_repo,
    major_item_repo,
    cost_repo,
    user_repo: user_repo.clone(),
    cache: project_cache.clone(),
    notifications: notification_service.clone(),
  }));

  let team_service = Arc::new(TeamService::new(TeamServiceDependencies {
    project_repo,
    join_request_repo,
    user_repo,
    cache: project_cache,
    notifications: notification_service.clone(),
  }));

  let chat_client: Option<Arc<dyn ChatCompletionClient>> = match config.assistant.api_key() {
    Some(api_key) => {
      let client: Arc<dyn ChatCompletionClient> = Arc::new(
        OpenAiChatClient::new(api_key, &config.assistant)
          .context("Failed to create assistant client")?,
      );
      Some(client)
    }
    None => {
      tracing::warn!("No assistant API key configured; chat requests will return 503");
      None
    }
  };
  let assistant_service = Arc::new(AssistantService::new(
    chat_client,
    config.assistant.system_prompt.clone(),
  ));

  // Use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));
  let get_user_use_case = Arc::new(GetCurrentUserUseCase::new(auth_service));

  let project_routes = ProjectRouteDependencies {
    list_projects: Arc::new(ListProjectsUseCase::new(project_service.clone())),
    create_project: Arc::new(CreateProjectUseCase::new(project_service.clone())),
    get_project_details: Arc::new(GetProjectDetailsUseCase::new(project_service.clone())),
    update_project: Arc::new(UpdateProjectUseCase::new(project_service.clone())),
    delete_project: Arc::new(DeleteProjectUseCase::new(project_service.clone())),
    finish_project: Arc::new(FinishProjectUseCase::new(project_service.clone())),
    create_objective: Arc::new(CreateObjectiveUseCase::new(project_service.clone())),
    create_major_item: Arc::new(CreateMajorItemUseCase::new(project_service.clone())),
    create_cost: Arc::new(CreateCostUseCase::new(project_service.clone())),
    delete_item: Arc::new(DeleteProjectItemUseCase::new(project_service.clone())),
    list_tasks: Arc::new(ListTasksUseCase::new(project_service.clone())),
    create_task: Arc::new(CreateTaskUseCase::new(project_service.clone())),
    update_task: Arc::new(UpdateTaskUseCase::new(project_service.clone())),
    toggle_task_status: Arc::new(ToggleTaskStatusUseCase::new(project_service)),
    get_team: Arc::new(GetTeamUseCase::new(team_service.clone())),
    request_to_join: Arc::new(RequestToJoinUseCase::new(team_service.clone())),
    handle_join_request: Arc::new(HandleJoinRequestUseCase::new(team_service.clone())),
    invite_team_member: Arc::new(InviteTeamMemberUseCase::new(team_service.clone())),
    remove_team_member: Arc::new(RemoveTeamMemberUseCase::new(team_service)),
  };

  let list_notifications_use_case =
    Arc::new(ListNotificationsUseCase::new(notification_service.clone()));
  let mark_read_use_case = Arc::new(MarkNotificationReadUseCase::new(
    notification_service.clone(),
  ));
  let mark_all_read_use_case =
    Arc::new(MarkAllNotificationsReadUseCase::new(notification_service));

  let ask_assistant_use_case = Arc::new(AskAssistantUseCase::new(assistant_service));

  // Per client IP, shared by every worker
  let assistant_governor = GovernorConfigBuilder::default()
    .period(config.rate_limit.assistant_interval())
    .burst_size(config.rate_limit.assistant_burst)
    .finish()
    .context("Invalid assistant rate limit configuration")?;

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .service(
        web::scope("/api/v1/auth")
          .service(
            web::scope("/me")
              .wrap(AuthMiddleware::new(get_user_use_case.clone()))
              .configure(configure_me_route),
          )
          .configure(|cfg| {
            configure_auth_routes(
              cfg,
              register_use_case.clone(),
              login_use_case.clone(),
              logout_use_case.clone(),
            )
          }),
      )
      .service(
        web::scope("/api/v1/projects")
          .wrap(AuthMiddleware::new(get_user_use_case.clone()))
          .configure(|cfg| configure_project_routes(cfg, project_routes.clone())),
      )
      .service(
        web::scope("/api/v1/notifications")
          .wrap(AuthMiddleware::new(get_user_use_case.clone()))
          .configure(|cfg| {
            configure_notification_routes(
              cfg,
              list_notifications_use_case.clone(),
              mark_read_use_case.clone(),
              mark_all_read_use_case.clone(),
            )
          }),
      )
      .service(
        web::scope("/api/v1/assistant")
          .wrap(Governor::new(&assistant_governor))
          .wrap(AuthMiddleware::new(get_user_use_case.clone()))
          .configure(|cfg| configure_assistant_routes(cfg, ask_assistant_use_case.clone())),
      )
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
