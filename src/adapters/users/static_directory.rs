//! User directory backed by a fixed list.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserDirectory;

/// Returns the same users on every lookup.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: Vec<UserId>,
}

impl StaticUserDirectory {
    pub fn new(users: Vec<UserId>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn active_user_ids(&self) -> Result<Vec<UserId>, DomainError> {
        Ok(self.users.clone())
    }
}
