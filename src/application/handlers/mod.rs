//! Application handlers.
//!
//! Event handlers that turn stored domain events into side effects.

mod talk_session_push_notification;

pub use talk_session_push_notification::{
    TalkSessionPushNotificationHandler, PUSH_NOTIFICATION_PRIORITY,
};
