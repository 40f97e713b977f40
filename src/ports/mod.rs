//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the event processing core and the outside world. Adapters implement these
//! ports.
//!
//! ## Event Ports
//!
//! - `EventStore` - Durable event log with processing status (outbox)
//! - `EventHandler` - Side effect triggered by a stored event
//!
//! ## Notification Ports
//!
//! - `PushNotificationSender` - Delivery of push notifications
//! - `UserDirectory` - Audience lookup for announcements

mod event_handler;
mod event_store;
mod push_notification_sender;
mod user_directory;

pub use event_handler::{EventHandler, HandlerContext};
pub(crate) use event_handler::shutdown_requested;
pub use event_store::EventStore;
pub use push_notification_sender::PushNotificationSender;
pub use user_directory::UserDirectory;
