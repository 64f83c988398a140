use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::NotificationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
  Info,
  /// Actionable by the project leader; carries the request id
  JoinRequest,
}

impl NotificationKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      NotificationKind::Info => "INFO",
      NotificationKind::JoinRequest => "JOIN_REQUEST",
    }
  }

  pub fn from_str(s: &str) -> Result<Self, NotificationError> {
    match s {
      "INFO" => Ok(NotificationKind::Info),
      "JOIN_REQUEST" => Ok(NotificationKind::JoinRequest),
      other => Err(NotificationError::InvalidKind(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
  pub id: Uuid,
  pub user_id: Uuid,
  pub content: String,
  pub link: Option<String>,
  pub is_read: bool,
  pub kind: NotificationKind,
  pub request_id: Option<Uuid>,
  pub project_id: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

impl Notification {
  pub fn new(user_id: Uuid, draft: NotificationDraft) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      content: draft.content,
      link: draft.link,
      is_read: false,
      kind: draft.kind,
      request_id: draft.request_id,
      project_id: draft.project_id,
      created_at: Utc::now(),
    }
  }
}

/// Notification content before a recipient is resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
  pub content: String,
  pub link: Option<String>,
  pub kind: NotificationKind,
  pub request_id: Option<Uuid>,
  pub project_id: Option<Uuid>,
}

impl NotificationDraft {
  pub fn info(content: impl Into<String>, project_id: Uuid, link: impl Into<String>) -> Self {
    Self {
      content: content.into(),
      link: Some(link.into()),
      kind: NotificationKind::Info,
      request_id: None,
      project_id: Some(project_id),
    }
  }

  pub fn join_request(
    content: impl Into<String>,
    project_id: Uuid,
    request_id: Uuid,
    link: impl Into<String>,
  ) -> Self {
    Self {
      content: content.into(),
      link: Some(link.into()),
      kind: NotificationKind::JoinRequest,
      request_id: Some(request_id),
      project_id: Some(project_id),
    }
  }
}

/// One page of a user's notifications
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationFeed {
  pub notifications: Vec<Notification>,
  pub unread_count: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_notification_is_unread() {
    let project_id = Uuid::new_v4();
    let request_id = Uuid::new_v4();
    let n = Notification::new(
      Uuid::new_v4(),
      NotificationDraft::join_request("Lan wants to join", project_id, request_id, "/projects/x"),
    );

    assert!(!n.is_read);
    assert_eq!(n.kind, NotificationKind::JoinRequest);
    assert_eq!(n.request_id, Some(request_id));
    assert_eq!(n.project_id, Some(project_id));
  }

  #[test]
  fn test_kind_round_trips_through_storage_text() {
    for kind in [NotificationKind::Info, NotificationKind::JoinRequest] {
      assert_eq!(NotificationKind::from_str(kind.as_str()).unwrap(), kind);
    }
    assert!(NotificationKind::from_str("EMAIL").is_err());
  }
}
