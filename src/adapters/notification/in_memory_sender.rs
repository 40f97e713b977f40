//! In-memory push notification sender for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::notification::PushNotification;
use crate::ports::PushNotificationSender;

/// Records every delivered notification for later assertions.
///
/// Can be told to fail the next delivery to exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryPushNotificationSender {
    sent: Mutex<Vec<PushNotification>>,
    fail_next: AtomicBool,
}

impl InMemoryPushNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Notifications delivered so far, in delivery order.
    pub fn sent(&self) -> Vec<PushNotification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make the next `send` or `send_batch` call fail without delivering.
    pub fn fail_next_delivery(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::NotificationDeliveryFailed,
                "Simulated delivery failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PushNotificationSender for InMemoryPushNotificationSender {
    async fn send(&self, notification: &PushNotification) -> Result<(), DomainError> {
        self.check_failure()?;
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        Ok(())
    }

    async fn send_batch(&self, notifications: &[PushNotification]) -> Result<(), DomainError> {
        self.check_failure()?;
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(notifications);
        Ok(())
    }
}
