//! Push notification adapters.
//!
//! - `LoggingPushNotificationSender` - Logs notifications (no provider configured)
//! - `InMemoryPushNotificationSender` - Captures notifications for testing

mod in_memory_sender;
mod logging_sender;

pub use in_memory_sender::InMemoryPushNotificationSender;
pub use logging_sender::LoggingPushNotificationSender;
