//! Notification module - push notifications produced by event handlers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{Timestamp, UserId};

/// Kind of push notification, used by clients to pick a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushNotificationType {
    NewTalkSession,
    TalkSessionEnd,
}

/// A push notification addressed to a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushNotification {
    pub recipient_id: UserId,
    pub kind: PushNotificationType,
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
    pub priority: String,
    pub sound: String,
    pub created_at: Timestamp,
}

impl PushNotification {
    /// Creates a high-priority notification with the default sound.
    pub fn new(
        recipient_id: UserId,
        kind: PushNotificationType,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            kind,
            title: title.into(),
            body: body.into(),
            data: BTreeMap::new(),
            priority: "high".to_string(),
            sound: "default".to_string(),
            created_at: Timestamp::now(),
        }
    }

    /// Add a key/value pair to the data payload.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }
}
