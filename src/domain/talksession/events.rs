//! Talk session domain events.

use serde::{Deserialize, Serialize};

use crate::domain::event::EventType;
use crate::domain::foundation::{EventId, OrganizationId, TalkSessionId, Timestamp, UserId};
use crate::domain_event;

pub const TALK_SESSION_STARTED: EventType = EventType::from_static("talksession.started");
pub const TALK_SESSION_ENDED: EventType = EventType::from_static("talksession.ended");

const AGGREGATE_TYPE: &str = "TalkSession";

/// Raised when a talk session opens for participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkSessionStarted {
    pub event_id: EventId,
    pub talk_session_id: TalkSessionId,
    pub owner_id: UserId,
    pub theme: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    pub scheduled_end_time: Timestamp,
    pub occurred_at: Timestamp,
}

domain_event!(
    TalkSessionStarted,
    event_type = TALK_SESSION_STARTED,
    aggregate_id = talk_session_id,
    aggregate_type = AGGREGATE_TYPE,
    occurred_at = occurred_at,
    event_id = event_id
);

impl TalkSessionStarted {
    pub fn new(
        talk_session_id: TalkSessionId,
        owner_id: UserId,
        theme: impl Into<String>,
        description: impl Into<String>,
        organization_id: Option<OrganizationId>,
        scheduled_end_time: Timestamp,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            talk_session_id,
            owner_id,
            theme: theme.into(),
            description: description.into(),
            organization_id,
            scheduled_end_time,
            occurred_at: Timestamp::now(),
        }
    }
}

/// Raised once a finished talk session has been closed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkSessionEnded {
    pub event_id: EventId,
    pub talk_session_id: TalkSessionId,
    pub owner_id: UserId,
    pub theme: String,
    pub participant_ids: Vec<UserId>,
    pub ended_at: Timestamp,
}

domain_event!(
    TalkSessionEnded,
    event_type = TALK_SESSION_ENDED,
    aggregate_id = talk_session_id,
    aggregate_type = AGGREGATE_TYPE,
    occurred_at = ended_at,
    event_id = event_id
);

impl TalkSessionEnded {
    pub fn new(
        talk_session_id: TalkSessionId,
        owner_id: UserId,
        theme: impl Into<String>,
        participant_ids: Vec<UserId>,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            talk_session_id,
            owner_id,
            theme: theme.into(),
            participant_ids,
            ended_at: Timestamp::now(),
        }
    }
}
