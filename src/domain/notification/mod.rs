pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{Notification, NotificationDraft, NotificationFeed, NotificationKind};
pub use errors::NotificationError;
pub use ports::NotificationRepository;
pub use services::NotificationService;
