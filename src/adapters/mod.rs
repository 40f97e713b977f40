//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the event processing core to external systems:
//! - `events` - Event store implementations
//! - `notification` - Push notification delivery
//! - `users` - User directory lookups

pub mod events;
pub mod notification;
pub mod users;

pub use events::InMemoryEventStore;
pub use notification::{InMemoryPushNotificationSender, LoggingPushNotificationSender};
pub use users::StaticUserDirectory;
