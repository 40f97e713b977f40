//! TalkSessionPushNotificationHandler - Push notifications for talk session lifecycle.
//!
//! - `talksession.started` → announce the new session, but only for sessions
//!   run by the operator organization (audience from [`UserDirectory`])
//! - `talksession.ended` → tell every participant the results are ready

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::event::{EventType, StoredEvent};
use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId, UserId};
use crate::domain::notification::{PushNotification, PushNotificationType};
use crate::domain::talksession::{
    TalkSessionEnded, TalkSessionStarted, TALK_SESSION_ENDED, TALK_SESSION_STARTED,
};
use crate::ports::{EventHandler, HandlerContext, PushNotificationSender, UserDirectory};

/// Runs ahead of lower-priority bookkeeping handlers.
pub const PUSH_NOTIFICATION_PRIORITY: i32 = 100;

/// Sends push notifications when talk sessions start and end.
pub struct TalkSessionPushNotificationHandler {
    sender: Arc<dyn PushNotificationSender>,
    users: Arc<dyn UserDirectory>,
    operator_organization_id: Option<OrganizationId>,
}

impl TalkSessionPushNotificationHandler {
    /// Creates a handler that never announces started sessions.
    pub fn new(sender: Arc<dyn PushNotificationSender>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            sender,
            users,
            operator_organization_id: None,
        }
    }

    /// Announce sessions started by this organization.
    pub fn with_operator_organization(mut self, organization_id: OrganizationId) -> Self {
        self.operator_organization_id = Some(organization_id);
        self
    }

    /// Event types this handler should be registered for.
    pub fn event_types() -> [EventType; 2] {
        [TALK_SESSION_STARTED, TALK_SESSION_ENDED]
    }

    async fn handle_started(&self, event: &StoredEvent) -> Result<(), DomainError> {
        let payload: TalkSessionStarted = event.payload_as()?;

        let is_operator_session = match (payload.organization_id, self.operator_organization_id) {
            (Some(session_org), Some(operator_org)) => session_org == operator_org,
            _ => false,
        };
        if !is_operator_session {
            debug!(
                talk_session_id = %payload.talk_session_id,
                "Talk session not run by operator organization, no announcement"
            );
            return Ok(());
        }

        let recipients = self.users.active_user_ids().await?;
        let notifications: Vec<_> = recipients
            .into_iter()
            .map(|user_id| started_notification(user_id, &payload))
            .collect();

        self.deliver(&notifications, &payload.talk_session_id.to_string())
            .await
    }

    async fn handle_ended(&self, event: &StoredEvent) -> Result<(), DomainError> {
        let payload: TalkSessionEnded = event.payload_as()?;

        let notifications: Vec<_> = payload
            .participant_ids
            .iter()
            .map(|user_id| ended_notification(*user_id, &payload))
            .collect();

        self.deliver(&notifications, &payload.talk_session_id.to_string())
            .await
    }

    async fn deliver(
        &self,
        notifications: &[PushNotification],
        talk_session_id: &str,
    ) -> Result<(), DomainError> {
        if notifications.is_empty() {
            info!(talk_session_id, "No recipients for push notification");
            return Ok(());
        }

        self.sender.send_batch(notifications).await?;

        info!(
            talk_session_id,
            recipients = notifications.len(),
            "Sent push notifications"
        );
        Ok(())
    }
}

fn started_notification(recipient_id: UserId, payload: &TalkSessionStarted) -> PushNotification {
    PushNotification::new(
        recipient_id,
        PushNotificationType::NewTalkSession,
        "New talk session",
        format!("\"{}\" is open for participation", payload.theme),
    )
    .with_data("talk_session_id", payload.talk_session_id.to_string())
    .with_data("action", "open_talk_session")
}

fn ended_notification(recipient_id: UserId, payload: &TalkSessionEnded) -> PushNotification {
    PushNotification::new(
        recipient_id,
        PushNotificationType::TalkSessionEnd,
        "Talk session ended",
        format!("Results for \"{}\" are ready", payload.theme),
    )
    .with_data("talk_session_id", payload.talk_session_id.to_string())
    .with_data("action", "open_talk_session_results")
}

#[async_trait]
impl EventHandler for TalkSessionPushNotificationHandler {
    fn can_handle(&self, event_type: &EventType) -> bool {
        *event_type == TALK_SESSION_STARTED || *event_type == TALK_SESSION_ENDED
    }

    async fn handle(&self, _ctx: &HandlerContext, event: &StoredEvent) -> Result<(), DomainError> {
        if event.event_type == TALK_SESSION_STARTED {
            self.handle_started(event).await
        } else if event.event_type == TALK_SESSION_ENDED {
            self.handle_ended(event).await
        } else {
            Err(DomainError::new(
                ErrorCode::HandlerFailed,
                format!("Unsupported event type: {}", event.event_type),
            )
            .with_detail("event_type", event.event_type.to_string()))
        }
    }

    fn priority(&self) -> i32 {
        PUSH_NOTIFICATION_PRIORITY
    }

    fn name(&self) -> &'static str {
        "TalkSessionPushNotificationHandler"
    }
}
