use std::sync::Arc;
use uuid::Uuid;

use crate::domain::notification::{NotificationError, NotificationService};

pub struct MarkAllNotificationsReadUseCase {
  notification_service: Arc<NotificationService>,
}

impl MarkAllNotificationsReadUseCase {
  pub fn new(notification_service: Arc<NotificationService>) -> Self {
    Self {
      notification_service,
    }
  }

  /// Returns how many notifications changed state
  pub async fn execute(&self, user_id: Uuid) -> Result<u64, NotificationError> {
    self.notification_service.mark_all_read(user_id).await
  }
}
