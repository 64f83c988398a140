use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::project::{MajorItem, MajorItemRepository, ProjectError};

#[derive(Debug, FromRow)]
struct MajorItemRow {
  id: Uuid,
  project_id: Uuid,
  name: String,
  created_at: DateTime<Utc>,
}

impl From<MajorItemRow> for MajorItem {
  fn from(row: MajorItemRow) -> Self {
    MajorItem {
      id: row.id,
      project_id: row.project_id,
      name: row.name,
      created_at: row.created_at,
    }
  }
}

pub struct PostgresMajorItemRepository {
  pool: PgPool,
}

impl PostgresMajorItemRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl MajorItemRepository for PostgresMajorItemRepository {
  async fn create(&self, item: MajorItem) -> Result<MajorItem, ProjectError> {
    let row = sqlx::query_as::<_, MajorItemRow>(
      r#"
            INSERT INTO major_items (id, project_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, project_id, name, created_at
            "#,
    )
    .bind(item.id)
    .bind(item.project_id)
    .bind(&item.name)
    .bind(item.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<MajorItem>, ProjectError> {
    let rows = sqlx::query_as::<_, MajorItemRow>(
      r#"
            SELECT id, project_id, name, created_at
            FROM major_items
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
    // Tasks under the item cascade
    let result = sqlx::query("DELETE FROM major_items WHERE id = $1 AND project_id = $2")
      .bind(id)
      .bind(project_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
