use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::project::{Project, ProjectError, ProjectRepository, ProjectStatus, Roster};

const PROJECT_COLUMNS: &str = "id, name, description, start_date, end_date, owner_id, members, \
  supervisors, status, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProjectRow {
  id: Uuid,
  name: String,
  description: Option<String>,
  start_date: NaiveDate,
  end_date: NaiveDate,
  owner_id: Uuid,
  members: Vec<String>,
  supervisors: Vec<String>,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

fn roster_column(roster: Roster) -> &'static str {
  match roster {
    Roster::Members => "members",
    Roster::Supervisors => "supervisors",
  }
}

impl TryFrom<ProjectRow> for Project {
  type Error = ProjectError;

  fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
    Ok(Project {
      id: row.id,
      name: row.name,
      description: row.description,
      start_date: row.start_date,
      end_date: row.end_date,
      owner_id: row.owner_id,
      members: row.members,
      supervisors: row.supervisors,
      status: ProjectStatus::from_str(&row.status)?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresProjectRepository {
  pool: PgPool,
}

impl PostgresProjectRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
  async fn create(&self, project: Project) -> Result<Project, ProjectError> {
    let row = sqlx::query_as::<_, ProjectRow>(&format!(
      r#"
            INSERT INTO projects ({PROJECT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PROJECT_COLUMNS}
            "#
    ))
    .bind(project.id)
    .bind(&project.name)
    .bind(&project.description)
    .bind(project.start_date)
    .bind(project.end_date)
    .bind(project.owner_id)
    .bind(&project.members)
    .bind(&project.supervisors)
    .bind(project.status.as_str())
    .bind(project.created_at)
    .bind(project.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectError> {
    let row = sqlx::query_as::<_, ProjectRow>(&format!(
      "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Project::try_from).transpose()
  }

  async fn find_visible_to(
    &self,
    user_id: Uuid,
    email: &str,
  ) -> Result<Vec<Project>, ProjectError> {
    let rows = sqlx::query_as::<_, ProjectRow>(&format!(
      r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE owner_id = $1 OR $2 = ANY(members) OR $2 = ANY(supervisors)
            ORDER BY created_at DESC
            "#
    ))
    .bind(user_id)
    .bind(email.to_lowercase())
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Project::try_from).collect()
  }

  async fn update(&self, project: Project) -> Result<Project, ProjectError> {
    let sql = format!(
      r#"
            UPDATE projects
            SET name = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
    );
    let row = sqlx::query_as::<_, ProjectRow>(&sql)
      .bind(project.id)
      .bind(&project.name)
      .bind(&project.description)
      .bind(project.start_date)
      .bind(project.end_date)
      .bind(project.updated_at)
      .fetch_optional(&self.pool)
      .await?
      .ok_or(ProjectError::ProjectNotFound)?;

    row.try_into()
  }

  async fn update_status(
    &self,
    id: Uuid,
    status: ProjectStatus,
  ) -> Result<Project, ProjectError> {
    let sql = format!(
      r#"
            UPDATE projects
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
    );
    let row = sqlx::query_as::<_, ProjectRow>(&sql)
      .bind(id)
      .bind(status.as_str())
      .fetch_optional(&self.pool)
      .await?
      .ok_or(ProjectError::ProjectNotFound)?;

    row.try_into()
  }

  async fn add_to_roster(
    &self,
    id: Uuid,
    roster: Roster,
    email: &str,
  ) -> Result<Project, ProjectError> {
    let column = roster_column(roster);
    let sql = format!(
      r#"
            UPDATE projects
            SET {column} = CASE
                  WHEN $2 = ANY({column}) THEN {column}
                  ELSE array_append({column}, $2)
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
    );
    let row = sqlx::query_as::<_, ProjectRow>(&sql)
      .bind(id)
      .bind(email.trim().to_lowercase())
      .fetch_optional(&self.pool)
      .await?
      .ok_or(ProjectError::ProjectNotFound)?;

    row.try_into()
  }

  async fn remove_from_roster(
    &self,
    id: Uuid,
    roster: Roster,
    email: &str,
  ) -> Result<Project, ProjectError> {
    let column = roster_column(roster);
    let sql = format!(
      r#"
            UPDATE projects
            SET {column} = array_remove({column}, $2), updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
    );
    let row = sqlx::query_as::<_, ProjectRow>(&sql)
      .bind(id)
      .bind(email.trim().to_lowercase())
      .fetch_optional(&self.pool)
      .await?
      .ok_or(ProjectError::ProjectNotFound)?;

    row.try_into()
  }

  async fn delete(&self, id: Uuid) -> Result<(), ProjectError> {
    // Child tables cascade on delete
    sqlx::query("DELETE FROM projects WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}
