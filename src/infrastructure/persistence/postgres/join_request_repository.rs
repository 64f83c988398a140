use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::project::{JoinRequest, JoinRequestRepository, ProjectError};

#[derive(Debug, FromRow)]
struct JoinRequestRow {
  id: Uuid,
  project_id: Uuid,
  user_email: String,
  created_at: DateTime<Utc>,
}

impl From<JoinRequestRow> for JoinRequest {
  fn from(row: JoinRequestRow) -> Self {
    JoinRequest {
      id: row.id,
      project_id: row.project_id,
      user_email: row.user_email,
      created_at: row.created_at,
    }
  }
}

pub struct PostgresJoinRequestRepository {
  pool: PgPool,
}

impl PostgresJoinRequestRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl JoinRequestRepository for PostgresJoinRequestRepository {
  /// The (project_id, user_email) unique constraint surfaces as `DuplicateKey`
  async fn create(&self, request: JoinRequest) -> Result<JoinRequest, ProjectError> {
    let row = sqlx::query_as::<_, JoinRequestRow>(
      r#"
            INSERT INTO join_requests (id, project_id, user_email, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, project_id, user_email, created_at
            "#,
    )
    .bind(request.id)
    .bind(request.project_id)
    .bind(&request.user_email)
    .bind(request.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<JoinRequest>, ProjectError> {
    let row = sqlx::query_as::<_, JoinRequestRow>(
      "SELECT id, project_id, user_email, created_at FROM join_requests WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_project_and_email(
    &self,
    project_id: Uuid,
    email: &str,
  ) -> Result<Option<JoinRequest>, ProjectError> {
    let row = sqlx::query_as::<_, JoinRequestRow>(
      r#"
            SELECT id, project_id, user_email, created_at
            FROM join_requests
            WHERE project_id = $1 AND user_email = $2
            "#,
    )
    .bind(project_id)
    .bind(email.to_lowercase())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn delete(&self, id: Uuid) -> Result<(), ProjectError> {
    sqlx::query("DELETE FROM join_requests WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}
