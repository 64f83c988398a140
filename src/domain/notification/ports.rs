use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Notification;
use super::errors::NotificationError;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
  async fn create(&self, notification: Notification) -> Result<Notification, NotificationError>;

  /// Newest first
  async fn find_recent(&self, user_id: Uuid, limit: i64)
  -> Result<Vec<Notification>, NotificationError>;

  async fn count_unread(&self, user_id: Uuid) -> Result<i64, NotificationError>;

  /// Returns false when no notification with that id belongs to the user
  async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<bool, NotificationError>;

  /// Returns the number of notifications changed
  async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, NotificationError>;

  /// Marks the user's join-request notifications for `request_id` as read
  async fn mark_join_request_read(
    &self,
    user_id: Uuid,
    request_id: Uuid,
  ) -> Result<u64, NotificationError>;
}
