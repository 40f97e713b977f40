//! UserDirectory port - audience lookup for broadcast notifications.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Read-only view of the user base used to pick notification recipients.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Users that should receive platform-wide announcements.
    async fn active_user_ids(&self) -> Result<Vec<UserId>, DomainError>;
}
