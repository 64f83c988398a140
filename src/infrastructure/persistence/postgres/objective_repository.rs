use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::project::{Objective, ObjectiveRepository, ProjectError};

#[derive(Debug, FromRow)]
struct ObjectiveRow {
  id: Uuid,
  project_id: Uuid,
  content: String,
  created_at: DateTime<Utc>,
}

impl From<ObjectiveRow> for Objective {
  fn from(row: ObjectiveRow) -> Self {
    Objective {
      id: row.id,
      project_id: row.project_id,
      content: row.content,
      created_at: row.created_at,
    }
  }
}

pub struct PostgresObjectiveRepository {
  pool: PgPool,
}

impl PostgresObjectiveRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ObjectiveRepository for PostgresObjectiveRepository {
  async fn create(&self, objective: Objective) -> Result<Objective, ProjectError> {
    let row = sqlx::query_as::<_, ObjectiveRow>(
      r#"
            INSERT INTO objectives (id, project_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, project_id, content, created_at
            "#,
    )
    .bind(objective.id)
    .bind(objective.project_id)
    .bind(&objective.content)
    .bind(objective.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Objective>, ProjectError> {
    let rows = sqlx::query_as::<_, ObjectiveRow>(
      r#"
            SELECT id, project_id, content, created_at
            FROM objectives
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
    )
    .bind(project_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError> {
    let result = sqlx::query("DELETE FROM objectives WHERE id = $1 AND project_id = $2")
      .bind(id)
      .bind(project_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
