//! Notification entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::foundation::{NotificationId, Timestamp, UserId};

/// What prompted a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Renewal,
    PaymentFailed,
    Cancellation,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::Renewal => "Renewal",
            NotificationKind::PaymentFailed => "PaymentFailed",
            NotificationKind::Cancellation => "Cancellation",
        };
        write!(f, "{}", s)
    }
}

/// A message addressed to one user, created as a side effect of service
/// operations and mutated only by mark-as-read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_date: Timestamp,
    pub is_read: bool,
}

impl Notification {
    /// Creates a fresh unread notification.
    pub fn new(user_id: UserId, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            kind,
            message: message.into(),
            created_date: Timestamp::now(),
            is_read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_starts_unread() {
        let n = Notification::new(UserId::new(), NotificationKind::Renewal, "due soon");
        assert!(!n.is_read);
        assert_eq!(n.kind, NotificationKind::Renewal);
    }

    #[test]
    fn round_trips_through_json() {
        let n = Notification::new(UserId::new(), NotificationKind::PaymentFailed, "declined");
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains("\"Kind\":\"PaymentFailed\""));
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}
