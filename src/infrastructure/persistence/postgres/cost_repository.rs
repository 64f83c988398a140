use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::project::{Cost, CostKind, CostRepository, ProjectError};

#[derive(Debug, FromRow)]
struct CostRow {
  id: Uuid,
  project_id: Uuid,
  description: String,
  amount: Decimal,
  kind: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<CostRow> for Cost {
  type Error = ProjectError;

  fn try_from(row: CostRow) -> Result<Self, Self::Error> {
    Ok(Cost {
      id: row.id,
      project_id: row.project_id,
      description: row.description,
      amount: row.amount,
      kind: CostKind::from_str(&row.kind)?,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresCostRepository {
  pool: PgPool,
}

impl PostgresCostRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CostRepository for PostgresCostRepository {
  async fn create(&self, cost: Cost) -> Result<Cost, ProjectError> {
    let row = sqlx::query_as::<_, CostRow>(
      r#"
            INSERT INTO costs (id, project_id, description, amount, kind, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, description, amount, kind, created_at
            "#,
    )
    .bind(cost.id)
    .bind(cost.project_id)
    .bind(&cost.description)
    .bind(cost.amount)
    .bind(cost.kind.as_str())
    .bind(cost.created_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Cost>, ProjectError> {
    let rows = sqlx::query_as::<_, CostRow>(
      r#"
            SELECT id, project_id, description, amount, kind, created_at
            FROM costs
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
    )
    .bind(project_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Cost::try_from).collect()
  }

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError> {
    let result = sqlx::query("DELETE FROM costs WHERE id = $1 AND project_id = $2")
      .bind(id)
      .bind(project_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
