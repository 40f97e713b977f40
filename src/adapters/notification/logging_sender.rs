//! Push notification sender that only logs.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::DomainError;
use crate::domain::notification::PushNotification;
use crate::ports::PushNotificationSender;

/// Writes one structured log line per notification instead of contacting a
/// push provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPushNotificationSender;

impl LoggingPushNotificationSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PushNotificationSender for LoggingPushNotificationSender {
    async fn send(&self, notification: &PushNotification) -> Result<(), DomainError> {
        info!(
            recipient_id = %notification.recipient_id,
            kind = ?notification.kind,
            title = %notification.title,
            priority = %notification.priority,
            data = ?notification.data,
            "Push notification"
        );
        Ok(())
    }

    async fn send_batch(&self, notifications: &[PushNotification]) -> Result<(), DomainError> {
        for notification in notifications {
            self.send(notification).await?;
        }
        Ok(())
    }
}
