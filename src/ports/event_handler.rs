//! EventHandler port - side effects triggered by stored events.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::domain::event::{EventType, StoredEvent};
use crate::domain::foundation::DomainError;

/// Handler for processing stored events.
///
/// Implementations should be:
/// - **Idempotent** - Delivery is at-least-once, the same record may arrive again
/// - **Cooperative** - Watch the `HandlerContext` and stop when it is cancelled
/// - **Independent** - Priority orders handlers but never expresses a dependency
///
/// # Example
///
/// ```ignore
/// struct AuditTrail { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for AuditTrail {
///     fn can_handle(&self, event_type: &EventType) -> bool {
///         event_type == &TALK_SESSION_ENDED
///     }
///
///     async fn handle(&self, ctx: &HandlerContext, event: &StoredEvent) -> Result<(), DomainError> {
///         let payload: TalkSessionEnded = event.payload_as()?;
///         // Append to the audit log...
///         Ok(())
///     }
///
///     fn priority(&self) -> i32 {
///         10
///     }
///
///     fn name(&self) -> &'static str {
///         "AuditTrail"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Finer-grained filter than registry routing.
    fn can_handle(&self, event_type: &EventType) -> bool;

    /// Perform the side effect. Payload decoding is the handler's job.
    async fn handle(&self, ctx: &HandlerContext, event: &StoredEvent) -> Result<(), DomainError>;

    /// Higher values run first within one event type.
    fn priority(&self) -> i32;

    /// Handler name for logging and failure reasons.
    fn name(&self) -> &'static str;
}

/// Per-event dispatch context handed to every handler.
///
/// Carries the deadline for the current event and the processor's shutdown
/// signal. The processor drops a handler's future once either fires, but a
/// handler doing blocking work between await points should poll
/// [`HandlerContext::is_cancelled`] itself.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    deadline: Instant,
    shutdown: Option<watch::Receiver<bool>>,
}

impl HandlerContext {
    /// Context that expires at `deadline`.
    pub fn new(deadline: Instant) -> Self {
        Self {
            deadline,
            shutdown: None,
        }
    }

    /// Context that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(Instant::now() + timeout)
    }

    /// Also cancel the context when the processor is asked to shut down.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Time left before the deadline (zero once expired).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|rx| *rx.borrow() || rx.has_changed().is_err())
            .unwrap_or(false)
    }

    /// True once the deadline passed or shutdown was requested.
    pub fn is_cancelled(&self) -> bool {
        Instant::now() >= self.deadline || self.is_shutdown_requested()
    }

    /// Resolves when the context is cancelled.
    pub async fn cancelled(&self) {
        match self.shutdown.clone() {
            Some(mut rx) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(self.deadline) => {}
                    _ = shutdown_requested(&mut rx) => {}
                }
            }
            None => tokio::time::sleep_until(self.deadline).await,
        }
    }
}

/// Resolves once the shutdown flag is `true` or its sender is gone.
pub(crate) async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    // An error means the sender was dropped, which also ends the loop.
    let _ = rx.wait_for(|stop| *stop).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[tokio::test(start_paused = true)]
    async fn context_expires_at_deadline() {
        let ctx = HandlerContext::with_timeout(Duration::from_secs(30));
        assert!(!ctx.is_cancelled());

        tokio::time::advance(Duration::from_secs(31)).await;

        assert!(ctx.is_cancelled());
        assert_eq!(ctx.remaining(), Duration::ZERO);
    }

    #[tokio::test]
    async fn context_observes_shutdown_signal() {
        let (tx, rx) = watch::channel(false);
        let ctx = HandlerContext::with_timeout(Duration::from_secs(30)).with_shutdown(rx);
        assert!(!ctx.is_cancelled());

        tx.send(true).unwrap();

        assert!(ctx.is_shutdown_requested());
        assert!(ctx.is_cancelled());
        ctx.cancelled().await;
    }

    #[tokio::test]
    async fn dropped_sender_counts_as_shutdown() {
        let (tx, rx) = watch::channel(false);
        let ctx = HandlerContext::with_timeout(Duration::from_secs(30)).with_shutdown(rx);

        drop(tx);

        assert!(ctx.is_shutdown_requested());
    }
}
