mod list_notifications;
mod mark_all_notifications_read;
mod mark_notification_read;

pub use list_notifications::ListNotificationsUseCase;
pub use mark_all_notifications_read::MarkAllNotificationsReadUseCase;
pub use mark_notification_read::{MarkNotificationReadCommand, MarkNotificationReadUseCase};
