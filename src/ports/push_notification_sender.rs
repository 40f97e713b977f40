//! PushNotificationSender port - delivery of push notifications to devices.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::notification::PushNotification;

/// Port for sending push notifications.
///
/// Provider protocols (APNS, FCM, web push) live behind adapters; handlers only
/// see this interface.
#[async_trait]
pub trait PushNotificationSender: Send + Sync {
    /// Send a single notification.
    async fn send(&self, notification: &PushNotification) -> Result<(), DomainError>;

    /// Send several notifications, stopping at the first delivery error.
    async fn send_batch(&self, notifications: &[PushNotification]) -> Result<(), DomainError>;
}
