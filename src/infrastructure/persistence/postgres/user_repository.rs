use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{entities::User, errors::AuthError, ports::UserRepository, value_objects::Email};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  first_name: Option<String>,
  password_hash: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.email,
      row.first_name,
      row.password_hash,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, email, first_name, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, first_name, password_hash, created_at, updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, first_name, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, first_name, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<User>, AuthError> {
    if emails.is_empty() {
      return Ok(Vec::new());
    }

    let lowered: Vec<String> = emails.iter().map(|e| e.to_lowercase()).collect();
    let rows = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, first_name, password_hash, created_at, updated_at
            FROM users
            WHERE email = ANY($1)
            "#,
    )
    .bind(&lowered)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_create_and_find_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = User::new("find@example.com".into(), "hash".into(), Some("Mai".into()));
    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.first_name.as_deref(), Some("Mai"));

    let email = Email::new("FIND@example.com").unwrap();
    let found = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_duplicate_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    repo
      .create(User::new("dup@example.com".into(), "h1".into(), None))
      .await
      .unwrap();
    let result = repo
      .create(User::new("dup@example.com".into(), "h2".into(), None))
      .await;

    match result.unwrap_err() {
      AuthError::Repository(RepositoryError::DuplicateKey(_)) => {}
      other => panic!("Expected Repository(DuplicateKey) error, got {:?}", other),
    }
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_find_by_emails_skips_unknown() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    repo
      .create(User::new("a@example.com".into(), "h".into(), None))
      .await
      .unwrap();
    repo
      .create(User::new("b@example.com".into(), "h".into(), None))
      .await
      .unwrap();

    let found = repo
      .find_by_emails(&["A@example.com".into(), "ghost@example.com".into()])
      .await
      .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email, "a@example.com");

    assert!(repo.find_by_emails(&[]).await.unwrap().is_empty());
  }
}
