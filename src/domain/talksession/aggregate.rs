//! TalkSession aggregate.
//!
//! Only the lifecycle transitions that raise domain events live here; the
//! rest of the session's data is managed by the CRUD layer.

use crate::domain::event::{DomainEvent, EventRecorder};
use crate::domain::foundation::{
    DomainError, ErrorCode, OrganizationId, TalkSessionId, Timestamp, UserId,
};

use super::events::{TalkSessionEnded, TalkSessionStarted, TALK_SESSION_STARTED};

/// A deliberation session whose start and end are announced to users.
#[derive(Debug)]
pub struct TalkSession {
    id: TalkSessionId,
    owner_id: UserId,
    theme: String,
    description: Option<String>,
    organization_id: Option<OrganizationId>,
    scheduled_end_time: Timestamp,
    end_processed: bool,
    events: EventRecorder,
}

impl TalkSession {
    pub fn new(
        id: TalkSessionId,
        owner_id: UserId,
        theme: impl Into<String>,
        description: Option<String>,
        organization_id: Option<OrganizationId>,
        scheduled_end_time: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            theme: theme.into(),
            description,
            organization_id,
            scheduled_end_time,
            end_processed: false,
            events: EventRecorder::new(),
        }
    }

    pub fn id(&self) -> TalkSessionId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn organization_id(&self) -> Option<OrganizationId> {
        self.organization_id
    }

    pub fn scheduled_end_time(&self) -> Timestamp {
        self.scheduled_end_time
    }

    /// A session is finished once its scheduled end time has passed.
    pub fn is_finished(&self, now: Timestamp) -> bool {
        !now.is_before(&self.scheduled_end_time)
    }

    pub fn is_end_processed(&self) -> bool {
        self.end_processed
    }

    /// Restores the end-processed flag when loading from persistence.
    pub fn mark_as_end_processed(&mut self) {
        self.end_processed = true;
    }

    /// Records a `TalkSessionStarted` event.
    ///
    /// # Errors
    ///
    /// - `SessionAlreadyStarted` if a start event is already buffered
    pub fn start_session(&mut self) -> Result<(), DomainError> {
        if self.events.has_recorded(&TALK_SESSION_STARTED) {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyStarted,
                "Session has already been started",
            ));
        }

        self.events.record_event(TalkSessionStarted::new(
            self.id,
            self.owner_id,
            self.theme.clone(),
            self.description.clone().unwrap_or_default(),
            self.organization_id,
            self.scheduled_end_time,
        ));
        Ok(())
    }

    /// Records a `TalkSessionEnded` event announcing the end to participants.
    ///
    /// # Errors
    ///
    /// - `SessionAlreadyEnded` if the end has already been processed
    /// - `SessionNotYetFinished` if `now` is before the scheduled end time
    pub fn end_session(
        &mut self,
        participant_ids: Vec<UserId>,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if self.end_processed {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyEnded,
                "Session has already been ended",
            ));
        }
        if !self.is_finished(now) {
            return Err(DomainError::new(
                ErrorCode::SessionNotYetFinished,
                "Session has not yet reached its scheduled end time",
            )
            .with_detail("scheduled_end_time", self.scheduled_end_time.to_string()));
        }

        self.events.record_event(TalkSessionEnded::new(
            self.id,
            self.owner_id,
            self.theme.clone(),
            participant_ids,
        ));
        self.end_processed = true;
        Ok(())
    }

    pub fn recorded_events(&self) -> &[Box<dyn DomainEvent>] {
        self.events.recorded_events()
    }

    pub fn clear_recorded_events(&mut self) {
        self.events.clear_recorded_events();
    }

    /// Drains buffered events for the unit of work to persist.
    pub fn take_recorded_events(&mut self) -> Vec<Box<dyn DomainEvent>> {
        self.events.take_recorded_events()
    }
}
