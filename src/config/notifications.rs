//! Notification configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::OrganizationId;

/// Settings for the push notification handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationsConfig {
    /// Organization whose new talk sessions are announced to all users.
    /// Unset means no session is announced.
    pub operator_organization_id: Option<String>,
}

impl NotificationsConfig {
    /// Parsed operator organization id, if configured.
    pub fn operator_organization(&self) -> Result<Option<OrganizationId>, ValidationError> {
        self.operator_organization_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse()
                    .map_err(|_| ValidationError::InvalidOrganizationId(raw.to_string()))
            })
            .transpose()
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.operator_organization().map(|_| ())
    }
}
