use std::sync::Arc;
use uuid::Uuid;

use crate::domain::notification::{NotificationError, NotificationService};

#[derive(Debug, Clone)]
pub struct MarkNotificationReadCommand {
  pub user_id: Uuid,
  pub notification_id: Uuid,
}

pub struct MarkNotificationReadUseCase {
  notification_service: Arc<NotificationService>,
}

impl MarkNotificationReadUseCase {
  pub fn new(notification_service: Arc<NotificationService>) -> Self {
    Self {
      notification_service,
    }
  }

  /// # Errors
  /// Returns `NotificationError::NotFound` if the notification is missing or
  /// belongs to another user
  pub async fn execute(&self, command: MarkNotificationReadCommand) -> Result<(), NotificationError> {
    self
      .notification_service
      .mark_read(command.user_id, command.notification_id)
      .await
  }
}
