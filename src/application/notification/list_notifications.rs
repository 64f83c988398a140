use std::sync::Arc;
use uuid::Uuid;

use crate::domain::notification::{NotificationError, NotificationFeed, NotificationService};

/// Most recent notifications for a user plus their unread count
pub struct ListNotificationsUseCase {
  notification_service: Arc<NotificationService>,
}

impl ListNotificationsUseCase {
  pub fn new(notification_service: Arc<NotificationService>) -> Self {
    Self {
      notification_service,
    }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<NotificationFeed, NotificationError> {
    self.notification_service.list(user_id).await
  }
}
