use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type NotificationId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: crate::new_id(),
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Returns true if this call changed the read state.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}
