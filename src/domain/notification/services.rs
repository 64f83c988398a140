use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::value_objects::Email;

use super::entities::{Notification, NotificationDraft, NotificationFeed};
use super::errors::NotificationError;
use super::ports::NotificationRepository;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Notification feed and best-effort delivery.
///
/// The `notify_*` and `resolve_*` methods never fail: errors are logged and
/// dropped so the write that triggered them still succeeds.
pub struct NotificationService {
  notification_repo: Arc<dyn NotificationRepository>,
  user_repo: Arc<dyn UserRepository>,
  page_size: i64,
}

impl NotificationService {
  pub fn new(
    notification_repo: Arc<dyn NotificationRepository>,
    user_repo: Arc<dyn UserRepository>,
    page_size: i64,
  ) -> Self {
    Self {
      notification_repo,
      user_repo,
      page_size,
    }
  }

  pub async fn list(&self, user_id: Uuid) -> Result<NotificationFeed, NotificationError> {
    let notifications = self
      .notification_repo
      .find_recent(user_id, self.page_size)
      .await?;
    let unread_count = self.notification_repo.count_unread(user_id).await?;

    Ok(NotificationFeed {
      notifications,
      unread_count,
    })
  }

  pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<(), NotificationError> {
    if !self.notification_repo.mark_read(user_id, id).await? {
      return Err(NotificationError::NotFound);
    }
    Ok(())
  }

  pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, NotificationError> {
    self.notification_repo.mark_all_read(user_id).await
  }

  pub async fn notify_user(&self, user_id: Uuid, draft: NotificationDraft) {
    if let Err(e) = self
      .notification_repo
      .create(Notification::new(user_id, draft))
      .await
    {
      tracing::warn!(%user_id, error = %e, "Failed to create notification");
    }
  }

  /// Notifies the account registered under `email`; unknown addresses are skipped
  pub async fn notify_email(&self, email: &str, draft: NotificationDraft) {
    match self.deliver_to_email(email, draft).await {
      Ok(true) => {}
      Ok(false) => tracing::debug!(email, "No account for notification recipient"),
      Err(e) => tracing::warn!(email, error = %e, "Failed to create notification"),
    }
  }

  /// Marks the leader's notifications about a handled join request as read
  pub async fn resolve_join_request(&self, user_id: Uuid, request_id: Uuid) {
    if let Err(e) = self
      .notification_repo
      .mark_join_request_read(user_id, request_id)
      .await
    {
      tracing::warn!(%user_id, %request_id, error = %e, "Failed to resolve join request notifications");
    }
  }

  async fn deliver_to_email(
    &self,
    email: &str,
    draft: NotificationDraft,
  ) -> Result<bool, NotificationError> {
    let Ok(email) = Email::new(email) else {
      return Ok(false);
    };
    let Some(user) = self.user_repo.find_by_email(&email).await? else {
      return Ok(false);
    };

    self
      .notification_repo
      .create(Notification::new(user.id, draft))
      .await?;
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::notification::entities::NotificationKind;
  use crate::domain::testutil::{InMemoryNotificationRepository, InMemoryUserRepository};

  struct Fixture {
    service: NotificationService,
    notifications: Arc<InMemoryNotificationRepository>,
    users: Arc<InMemoryUserRepository>,
  }

  fn fixture(page_size: i64) -> Fixture {
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let service = NotificationService::new(notifications.clone(), users.clone(), page_size);
    Fixture {
      service,
      notifications,
      users,
    }
  }

  fn draft(content: &str) -> NotificationDraft {
    NotificationDraft::info(content, Uuid::new_v4(), "/projects/x")
  }

  #[tokio::test]
  async fn test_list_returns_newest_page_and_unread_count() {
    let f = fixture(2);
    let user_id = Uuid::new_v4();
    for content in ["first", "second", "third"] {
      f.service.notify_user(user_id, draft(content)).await;
    }
    f.service.notify_user(Uuid::new_v4(), draft("someone else")).await;

    let feed = f.service.list(user_id).await.unwrap();

    let contents: Vec<&str> = feed.notifications.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["third", "second"]);
    assert_eq!(feed.unread_count, 3);
  }

  #[tokio::test]
  async fn test_mark_read_only_touches_own_notifications() {
    let f = fixture(DEFAULT_PAGE_SIZE);
    let owner = Uuid::new_v4();
    f.service.notify_user(owner, draft("hello")).await;
    let id = f.notifications.all()[0].id;

    let err = f.service.mark_read(Uuid::new_v4(), id).await.unwrap_err();
    assert!(matches!(err, NotificationError::NotFound));

    f.service.mark_read(owner, id).await.unwrap();
    assert_eq!(f.service.list(owner).await.unwrap().unread_count, 0);
  }

  #[tokio::test]
  async fn test_mark_all_read() {
    let f = fixture(DEFAULT_PAGE_SIZE);
    let user_id = Uuid::new_v4();
    f.service.notify_user(user_id, draft("a")).await;
    f.service.notify_user(user_id, draft("b")).await;

    assert_eq!(f.service.mark_all_read(user_id).await.unwrap(), 2);
    assert_eq!(f.service.mark_all_read(user_id).await.unwrap(), 0);
  }

  #[tokio::test]
  async fn test_notify_email_skips_unknown_addresses() {
    let f = fixture(DEFAULT_PAGE_SIZE);
    let user = f.users.insert("dev@x.io", Some("Dev"));

    f.service.notify_email("ghost@x.io", draft("lost")).await;
    f.service.notify_email("not an email", draft("lost")).await;
    f.service.notify_email("DEV@x.io", draft("found")).await;

    let all = f.notifications.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].user_id, user.id);
    assert_eq!(all[0].content, "found");
  }

  #[tokio::test]
  async fn test_delivery_failures_are_swallowed() {
    let f = fixture(DEFAULT_PAGE_SIZE);
    f.users.insert("dev@x.io", None);
    f.notifications.fail_writes(true);

    f.service.notify_email("dev@x.io", draft("dropped")).await;
    f.service.notify_user(Uuid::new_v4(), draft("dropped")).await;
    f.service
      .resolve_join_request(Uuid::new_v4(), Uuid::new_v4())
      .await;

    assert!(f.notifications.all().is_empty());
  }

  #[tokio::test]
  async fn test_resolve_join_request_marks_matching_notifications() {
    let f = fixture(DEFAULT_PAGE_SIZE);
    let leader = Uuid::new_v4();
    let request_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    f.service
      .notify_user(
        leader,
        NotificationDraft::join_request("Lan wants to join", project_id, request_id, "/p"),
      )
      .await;
    f.service.notify_user(leader, draft("unrelated")).await;

    f.service.resolve_join_request(leader, request_id).await;

    let all = f.notifications.all();
    let join = all
      .iter()
      .find(|n| n.kind == NotificationKind::JoinRequest)
      .unwrap();
    assert!(join.is_read);
    assert_eq!(f.service.list(leader).await.unwrap().unread_count, 1);
  }
}
