//! Talk session module - the aggregate that raises session lifecycle events.

mod aggregate;
mod events;

pub use aggregate::TalkSession;
pub use events::{TalkSessionEnded, TalkSessionStarted, TALK_SESSION_ENDED, TALK_SESSION_STARTED};
