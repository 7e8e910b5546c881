//! Admin-facing notification records.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewBooking,
}

/// A row in the `adminNotifications` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub client_name: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub read: bool,
}

impl AdminNotification {
    pub fn new_booking(client_name: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            kind: NotificationKind::NewBooking,
            client_name: client_name.into(),
            timestamp,
            read: false,
        }
    }
}

pub fn unread_count(notifications: &[AdminNotification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
