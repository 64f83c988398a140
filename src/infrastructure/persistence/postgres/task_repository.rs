use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::project::{ProjectError, Task, TaskCounts, TaskRepository, TaskStatus};

const TASK_SELECT: &str = r#"
  SELECT t.id, t.project_id, t.major_item_id, t.minor_item, t.deadline, t.main_resp,
         t.sub_resp, t.status, t.created_at, t.updated_at,
         ARRAY(
           SELECT o.objective_id FROM task_objectives o
           WHERE o.task_id = t.id
           ORDER BY o.objective_id
         ) AS objective_ids
  FROM tasks t
"#;

#[derive(Debug, FromRow)]
struct TaskRow {
  id: Uuid,
  project_id: Uuid,
  major_item_id: Uuid,
  minor_item: String,
  deadline: NaiveDate,
  main_resp: Option<String>,
  sub_resp: Option<String>,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  objective_ids: Vec<Uuid>,
}

impl TryFrom<TaskRow> for Task {
  type Error = ProjectError;

  fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
    Ok(Task {
      id: row.id,
      project_id: row.project_id,
      major_item_id: row.major_item_id,
      minor_item: row.minor_item,
      deadline: row.deadline,
      main_resp: row.main_resp,
      sub_resp: row.sub_resp,
      status: TaskStatus::from_str(&row.status)?,
      objective_ids: row.objective_ids,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct TaskCountRow {
  project_id: Uuid,
  total: i64,
  done: i64,
}

pub struct PostgresTaskRepository {
  pool: PgPool,
}

impl PostgresTaskRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn link_objectives(
    tx: &mut Transaction<'_, Postgres>,
    task_id: Uuid,
    objective_ids: &[Uuid],
  ) -> Result<(), ProjectError> {
    if objective_ids.is_empty() {
      return Ok(());
    }

    sqlx::query(
      r#"
            INSERT INTO task_objectives (task_id, objective_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
    )
    .bind(task_id)
    .bind(objective_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
  }

  async fn fetch(&self, id: Uuid) -> Result<Task, ProjectError> {
    self.find_by_id(id).await?.ok_or(ProjectError::TaskNotFound)
  }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
  async fn create(&self, task: Task) -> Result<Task, ProjectError> {
    let mut tx = self.pool.begin().await?;

    sqlx::query(
      r#"
            INSERT INTO tasks (id, project_id, major_item_id, minor_item, deadline, main_resp,
                               sub_resp, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
    )
    .bind(task.id)
    .bind(task.project_id)
    .bind(task.major_item_id)
    .bind(&task.minor_item)
    .bind(task.deadline)
    .bind(&task.main_resp)
    .bind(&task.sub_resp)
    .bind(task.status.as_str())
    .bind(task.created_at)
    .bind(task.updated_at)
    .execute(&mut *tx)
    .await?;

    Self::link_objectives(&mut tx, task.id, &task.objective_ids).await?;
    tx.commit().await?;

    self.fetch(task.id).await
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, ProjectError> {
    let row = sqlx::query_as::<_, TaskRow>(&format!("{TASK_SELECT} WHERE t.id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    row.map(Task::try_from).transpose()
  }

  async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, ProjectError> {
    let rows = sqlx::query_as::<_, TaskRow>(&format!(
      "{TASK_SELECT} WHERE t.project_id = $1 ORDER BY t.deadline ASC, t.created_at ASC"
    ))
    .bind(project_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Task::try_from).collect()
  }

  async fn count_by_projects(
    &self,
    project_ids: &[Uuid],
  ) -> Result<HashMap<Uuid, TaskCounts>, ProjectError> {
    if project_ids.is_empty() {
      return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, TaskCountRow>(
      r#"
            SELECT project_id,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'DONE') AS done
            FROM tasks
            WHERE project_id = ANY($1)
            GROUP BY project_id
            "#,
    )
    .bind(project_ids)
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|row| {
          let counts = TaskCounts {
            total: u32::try_from(row.total).unwrap_or(u32::MAX),
            done: u32::try_from(row.done).unwrap_or(u32::MAX),
          };
          (row.project_id, counts)
        })
        .collect(),
    )
  }

  async fn update(&self, task: Task) -> Result<Task, ProjectError> {
    let mut tx = self.pool.begin().await?;

    let result = sqlx::query(
      r#"
            UPDATE tasks
            SET major_item_id = $2,
                minor_item = $3,
                deadline = $4,
                main_resp = $5,
                sub_resp = $6,
                status = $7,
                updated_at = $8
            WHERE id = $1
            "#,
    )
    .bind(task.id)
    .bind(task.major_item_id)
    .bind(&task.minor_item)
    .bind(task.deadline)
    .bind(&task.main_resp)
    .bind(&task.sub_resp)
    .bind(task.status.as_str())
    .bind(task.updated_at)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
      return Err(ProjectError::TaskNotFound);
    }

    sqlx::query("DELETE FROM task_objectives WHERE task_id = $1")
      .bind(task.id)
      .execute(&mut *tx)
      .await?;
    Self::link_objectives(&mut tx, task.id, &task.objective_ids).await?;
    tx.commit().await?;

    self.fetch(task.id).await
  }

  async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<(), ProjectError> {
    let result = sqlx::query("UPDATE tasks SET status = $2, updated_at = NOW() WHERE id = $1")
      .bind(id)
      .bind(status.as_str())
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(ProjectError::TaskNotFound);
    }
    Ok(())
  }

  async fn delete(&self, project_id: Uuid, id: Uuid) -> Result<bool, ProjectError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
      .bind(id)
      .bind(project_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::User;
  use crate::domain::auth::ports::UserRepository;
  use crate::domain::project::{
    MajorItem, MajorItemRepository, Objective, ObjectiveRepository, Project, ProjectRepository,
    TaskDetails,
  };
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;
  use crate::infrastructure::persistence::postgres::{
    PostgresMajorItemRepository, PostgresObjectiveRepository, PostgresProjectRepository,
    PostgresUserRepository,
  };

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_task_objective_links_and_counts() {
    let (pool, _container) = setup_test_db().await;
    let owner = PostgresUserRepository::new(pool.clone())
      .create(User::new("lead@example.com".into(), "h".into(), None))
      .await
      .unwrap();
    let project = PostgresProjectRepository::new(pool.clone())
      .create(Project::new("Launch".into(), None, None, None, owner.id))
      .await
      .unwrap();
    let objectives = PostgresObjectiveRepository::new(pool.clone());
    let first = objectives
      .create(Objective::new(project.id, "Ship".into()))
      .await
      .unwrap();
    let second = objectives
      .create(Objective::new(project.id, "Grow".into()))
      .await
      .unwrap();
    let major_items = PostgresMajorItemRepository::new(pool.clone());
    let item = major_items
      .create(MajorItem::new(project.id, "Design".into()))
      .await
      .unwrap();
    let repo = PostgresTaskRepository::new(pool);

    let task = Task::new(
      project.id,
      TaskDetails {
        major_item_id: item.id,
        minor_item: "Wireframes".into(),
        deadline: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        main_resp: Some("dev@example.com".into()),
        sub_resp: None,
        objective_ids: vec![first.id],
      },
    );
    let created = repo.create(task).await.unwrap();
    assert_eq!(created.objective_ids, vec![first.id]);

    let mut relinked = created.clone();
    relinked.objective_ids = vec![second.id];
    let updated = repo.update(relinked).await.unwrap();
    assert_eq!(updated.objective_ids, vec![second.id]);

    repo
      .update_status(created.id, TaskStatus::Done)
      .await
      .unwrap();
    let counts = repo.count_by_projects(&[project.id]).await.unwrap();
    assert_eq!(counts[&project.id], TaskCounts { total: 1, done: 1 });

    // Deleting the major item removes its tasks
    assert!(major_items.delete(project.id, item.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    assert!(!repo.delete(project.id, created.id).await.unwrap());
  }
}
