use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::notification::{
  Notification, NotificationError, NotificationKind, NotificationRepository,
};

#[derive(Debug, FromRow)]
struct NotificationRow {
  id: Uuid,
  user_id: Uuid,
  content: String,
  link: Option<String>,
  is_read: bool,
  kind: String,
  request_id: Option<Uuid>,
  project_id: Option<Uuid>,
  created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
  type Error = NotificationError;

  fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
    Ok(Notification {
      id: row.id,
      user_id: row.user_id,
      content: row.content,
      link: row.link,
      is_read: row.is_read,
      kind: NotificationKind::from_str(&row.kind)?,
      request_id: row.request_id,
      project_id: row.project_id,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresNotificationRepository {
  pool: PgPool,
}

impl PostgresNotificationRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
  async fn create(&self, notification: Notification) -> Result<Notification, NotificationError> {
    let row = sqlx::query_as::<_, NotificationRow>(
      r#"
            INSERT INTO notifications (id, user_id, content, link, is_read, kind, request_id,
                                       project_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, content, link, is_read, kind, request_id, project_id, created_at
            "#,
    )
    .bind(notification.id)
    .bind(notification.user_id)
    .bind(&notification.content)
    .bind(&notification.link)
    .bind(notification.is_read)
    .bind(notification.kind.as_str())
    .bind(notification.request_id)
    .bind(notification.project_id)
    .bind(notification.created_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_recent(
    &self,
    user_id: Uuid,
    limit: i64,
  ) -> Result<Vec<Notification>, NotificationError> {
    let rows = sqlx::query_as::<_, NotificationRow>(
      r#"
            SELECT id, user_id, content, link, is_read, kind, request_id, project_id, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Notification::try_from).collect()
  }

  async fn count_unread(&self, user_id: Uuid) -> Result<i64, NotificationError> {
    let count: i64 = sqlx::query_scalar(
      "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(count)
  }

  async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<bool, NotificationError> {
    let result =
      sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

    Ok(result.rows_affected() > 0)
  }

  async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, NotificationError> {
    let result = sqlx::query(
      "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected())
  }

  async fn mark_join_request_read(
    &self,
    user_id: Uuid,
    request_id: Uuid,
  ) -> Result<u64, NotificationError> {
    let result = sqlx::query(
      r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_id = $1 AND request_id = $2 AND kind = 'JOIN_REQUEST' AND is_read = FALSE
            "#,
    )
    .bind(user_id)
    .bind(request_id)
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::User;
  use crate::domain::auth::ports::UserRepository;
  use crate::domain::notification::NotificationDraft;
  use crate::domain::project::{Project, ProjectRepository};
  use crate::infrastructure::persistence::postgres::{
    PostgresProjectRepository, PostgresUserRepository,
  };
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_read_state_is_scoped_to_owner() {
    let (pool, _container) = setup_test_db().await;
    let users = PostgresUserRepository::new(pool.clone());
    let repo = PostgresNotificationRepository::new(pool.clone());

    let alice = users
      .create(User::new("alice@example.com".into(), "h".into(), None))
      .await
      .unwrap();
    let bob = users
      .create(User::new("bob@example.com".into(), "h".into(), None))
      .await
      .unwrap();

    let project = PostgresProjectRepository::new(pool.clone())
      .create(Project::new("Launch".into(), None, None, None, alice.id))
      .await
      .unwrap();

    let request_id = Uuid::new_v4();
    let info = repo
      .create(Notification::new(
        alice.id,
        NotificationDraft::info("Hello", project.id, project.link()),
      ))
      .await
      .unwrap();
    repo
      .create(Notification::new(
        alice.id,
        NotificationDraft::join_request("Join?", project.id, request_id, project.link()),
      ))
      .await
      .unwrap();

    assert_eq!(repo.count_unread(alice.id).await.unwrap(), 2);
    assert!(!repo.mark_read(bob.id, info.id).await.unwrap());
    assert!(repo.mark_read(alice.id, info.id).await.unwrap());

    assert_eq!(
      repo
        .mark_join_request_read(alice.id, request_id)
        .await
        .unwrap(),
      1
    );
    assert_eq!(repo.count_unread(alice.id).await.unwrap(), 0);
    assert_eq!(repo.find_recent(alice.id, 20).await.unwrap().len(), 2);
  }
}
