//! EventProcessor - Background poller that drives side effects from the event log.
//!
//! This service implements the consuming half of the Transactional Outbox Pattern:
//! 1. The unit of work stores domain events with the aggregate's changes
//! 2. **EventProcessor polls the store and dispatches to handlers** ← This module
//!
//! ## Delivery Guarantees
//!
//! - Events in one batch are handled sequentially, in store order
//! - Handlers for one event run in descending priority order, all of them,
//!   even when an earlier one fails
//! - Fetch, dispatch and mark are separate steps, so a failed mark call (or a
//!   crash) leads to redelivery: handlers must be idempotent
//! - A failed event stays eligible and is dispatched again on every poll
//!   until all of its handlers succeed. There is no attempt limit.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval` | 10s | Time between polls |
//! | `batch_size` | 100 | Max events fetched per poll |
//! | `handler_timeout` | 30s | Budget for all handlers of one event |
//!
//! ## Shutdown
//!
//! `run` exits as soon as the shutdown signal fires. An event whose handlers
//! are still running is abandoned without being marked, so it is picked up
//! again on the next start.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use crate::domain::event::StoredEvent;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{shutdown_requested, EventStore, HandlerContext};

use super::HandlerRegistry;

/// Shortest poll interval the loop accepts; zero would make `interval` panic.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for the EventProcessor service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventProcessorConfig {
    /// How often to poll for unprocessed events.
    pub poll_interval: Duration,

    /// Maximum events to process per poll cycle.
    pub batch_size: usize,

    /// Deadline for dispatching one event to all of its handlers.
    pub handler_timeout: Duration,
}

impl Default for EventProcessorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            batch_size: 100,
            handler_timeout: Duration::from_secs(30),
        }
    }
}

impl EventProcessorConfig {
    /// Create config with custom poll interval (at least 1ms).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Create config with custom batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Create config with custom per-event handler timeout.
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }
}

/// Summary of one poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Events returned by the store.
    pub fetched: usize,
    /// Events whose handlers all succeeded (or that had no handler).
    pub processed: usize,
    /// Events with at least one handler error.
    pub failed: usize,
    /// Events left untouched because shutdown was requested.
    pub abandoned: usize,
    /// Mark calls that failed; those events will be redelivered.
    pub mark_errors: usize,
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EventOutcome {
    Processed,
    Failed(String),
    Abandoned,
}

/// Background service that dispatches stored events to registered handlers.
pub struct EventProcessor {
    event_store: Arc<dyn EventStore>,
    registry: Arc<HandlerRegistry>,
    config: EventProcessorConfig,
}

impl EventProcessor {
    /// Create a new EventProcessor with default configuration.
    pub fn new(event_store: Arc<dyn EventStore>, registry: Arc<HandlerRegistry>) -> Self {
        Self::with_config(event_store, registry, EventProcessorConfig::default())
    }

    /// Create a new EventProcessor with custom configuration.
    pub fn with_config(
        event_store: Arc<dyn EventStore>,
        registry: Arc<HandlerRegistry>,
        config: EventProcessorConfig,
    ) -> Self {
        Self {
            event_store,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &EventProcessorConfig {
        &self.config
    }

    /// Run the processor on its own task until shutdown.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    /// Run the poll loop until the shutdown signal is `true` or its sender
    /// is dropped.
    ///
    /// One batch runs immediately, then one per `poll_interval`. A slow batch
    /// delays the next tick rather than causing a burst of catch-up polls.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            batch_size = self.config.batch_size,
            "Event processor started"
        );

        let period = self.config.poll_interval.max(MIN_POLL_INTERVAL);
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if !is_shutdown(&shutdown) {
            self.poll(Some(&shutdown)).await;
        }

        loop {
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => {
                    info!("Event processor stopping");
                    return;
                }

                _ = interval.tick() => {
                    self.poll(Some(&shutdown)).await;
                }
            }
        }
    }

    /// Process a single batch of unprocessed events.
    ///
    /// This method is also useful for testing without running the full loop.
    pub async fn process_batch(&self) -> BatchOutcome {
        self.poll(None).await
    }

    async fn poll(&self, shutdown: Option<&watch::Receiver<bool>>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        let event_types = self.registry.registered_event_types();
        if event_types.is_empty() {
            debug!("No event types registered, skipping poll");
            return outcome;
        }

        let events = match self
            .event_store
            .get_unprocessed_events(&event_types, self.config.batch_size)
            .await
        {
            Ok(events) => events,
            Err(e) => {
                // Nothing was marked, so the same events come back next tick.
                error!(error = %e, "Failed to fetch unprocessed events");
                return outcome;
            }
        };

        outcome.fetched = events.len();
        if events.is_empty() {
            return outcome;
        }

        info!(count = events.len(), "Processing events");

        for (index, event) in events.iter().enumerate() {
            match self.process_event(event, shutdown).await {
                EventOutcome::Processed => {
                    outcome.processed += 1;
                    if let Err(e) = self.event_store.mark_as_processed(event.id).await {
                        outcome.mark_errors += 1;
                        error!(
                            event_id = %event.id,
                            error = %e,
                            "Failed to mark event as processed"
                        );
                    }
                }
                EventOutcome::Failed(reason) => {
                    outcome.failed += 1;
                    error!(
                        event_id = %event.id,
                        event_type = %event.event_type,
                        reason = %reason,
                        "Event processing failed"
                    );
                    if let Err(e) = self.event_store.mark_as_failed(event.id, &reason).await {
                        outcome.mark_errors += 1;
                        error!(
                            event_id = %event.id,
                            error = %e,
                            "Failed to mark event as failed"
                        );
                    }
                }
                EventOutcome::Abandoned => {
                    outcome.abandoned = events.len() - index;
                    warn!(
                        event_id = %event.id,
                        remaining = outcome.abandoned,
                        "Shutdown requested, leaving remaining events pending"
                    );
                    break;
                }
            }
        }

        outcome
    }

    #[instrument(
        skip(self, event, shutdown),
        fields(event_id = %event.id, event_type = %event.event_type)
    )]
    async fn process_event(
        &self,
        event: &StoredEvent,
        shutdown: Option<&watch::Receiver<bool>>,
    ) -> EventOutcome {
        let handlers = self.registry.handlers(&event.event_type);
        if handlers.is_empty() {
            // Treated as "nothing to do": the event is marked processed.
            warn!("No handlers registered for event type");
            return EventOutcome::Processed;
        }

        let deadline = Instant::now() + self.config.handler_timeout;
        let mut ctx = HandlerContext::new(deadline);
        if let Some(rx) = shutdown {
            ctx = ctx.with_shutdown(rx.clone());
        }

        let mut errors = Vec::new();
        for handler in handlers.iter().filter(|h| h.can_handle(&event.event_type)) {
            debug!(
                handler = handler.name(),
                priority = handler.priority(),
                "Dispatching event to handler"
            );

            let invocation = time::timeout_at(deadline, handler.handle(&ctx, event));
            let result = match shutdown {
                Some(rx) => {
                    let mut rx = rx.clone();
                    tokio::select! {
                        result = invocation => result,
                        _ = shutdown_requested(&mut rx) => return EventOutcome::Abandoned,
                    }
                }
                None => invocation.await,
            };

            let error = match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(_) => DomainError::new(
                    ErrorCode::Timeout,
                    format!(
                        "handler timed out after {}ms",
                        self.config.handler_timeout.as_millis()
                    ),
                ),
            };
            warn!(handler = handler.name(), error = %error, "Handler failed");
            errors.push(format!(
                "{} (priority={}): {}",
                handler.name(),
                handler.priority(),
                error
            ));
        }

        if errors.is_empty() {
            EventOutcome::Processed
        } else {
            EventOutcome::Failed(format!("Handler errors: {}", errors.join(", ")))
        }
    }
}

fn is_shutdown(rx: &watch::Receiver<bool>) -> bool {
    *rx.borrow() || rx.has_changed().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{DomainEvent, EventId, EventStatus, EventType};
    use crate::domain::foundation::Timestamp;
    use crate::ports::EventHandler;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    const STARTED: EventType = EventType::from_static("talksession.started");
    const ENDED: EventType = EventType::from_static("talksession.ended");

    /// Event store fake that counts calls and can be told to fail.
    #[derive(Default)]
    struct TestEventStore {
        events: Mutex<Vec<StoredEvent>>,
        fetch_calls: AtomicUsize,
        mark_calls: AtomicUsize,
        last_limit: AtomicUsize,
        fail_fetch: AtomicBool,
        fail_marks: AtomicBool,
    }

    impl TestEventStore {
        fn with_pending(events: Vec<StoredEvent>) -> Self {
            Self {
                events: Mutex::new(events),
                ..Default::default()
            }
        }

        fn status_of(&self, id: EventId) -> EventStatus {
            self.events
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.status)
                .unwrap()
        }

        fn failure_reason_of(&self, id: EventId) -> Option<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .and_then(|e| e.failure_reason.clone())
        }

        fn fetches(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }

        fn marks(&self) -> usize {
            self.mark_calls.load(Ordering::SeqCst)
        }

        fn mark_with(&self, id: EventId, f: impl FnOnce(&mut StoredEvent)) -> Result<(), DomainError> {
            self.mark_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_marks.load(Ordering::SeqCst) {
                return Err(DomainError::new(ErrorCode::StorageError, "mark failed"));
            }
            let mut events = self.events.lock().unwrap();
            let event = events.iter_mut().find(|e| e.id == id).unwrap();
            f(event);
            Ok(())
        }
    }

    #[async_trait]
    impl EventStore for TestEventStore {
        async fn store(&self, event: &dyn DomainEvent) -> Result<(), DomainError> {
            let record = StoredEvent::from_domain_event(event)?;
            self.events.lock().unwrap().push(record);
            Ok(())
        }

        async fn store_batch(&self, events: &[Box<dyn DomainEvent>]) -> Result<(), DomainError> {
            for event in events {
                self.store(event.as_ref()).await?;
            }
            Ok(())
        }

        async fn get_unprocessed_events(
            &self,
            event_types: &[EventType],
            limit: usize,
        ) -> Result<Vec<StoredEvent>, DomainError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.last_limit.store(limit, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(DomainError::new(ErrorCode::StorageError, "connection refused"));
            }
            Ok(self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| !e.status.is_terminal() && event_types.contains(&e.event_type))
                .take(limit)
                .cloned()
                .collect())
        }

        async fn mark_as_processed(&self, id: EventId) -> Result<(), DomainError> {
            self.mark_with(id, |e| {
                e.mark_processed(Timestamp::now());
            })
        }

        async fn mark_as_failed(&self, id: EventId, reason: &str) -> Result<(), DomainError> {
            self.mark_with(id, |e| {
                e.mark_failed(reason, Timestamp::now());
            })
        }
    }

    /// Handler that records each invocation into a shared log.
    struct TestHandler {
        label: &'static str,
        priority: i32,
        accepts: bool,
        fail_with: Option<&'static str>,
        delay: Option<Duration>,
        calls: AtomicUsize,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl TestHandler {
        fn new(label: &'static str, priority: i32, log: &Arc<Mutex<Vec<&'static str>>>) -> Self {
            Self {
                label,
                priority,
                accepts: true,
                fail_with: None,
                delay: None,
                calls: AtomicUsize::new(0),
                log: Arc::clone(log),
            }
        }

        fn failing(mut self, message: &'static str) -> Self {
            self.fail_with = Some(message);
            self
        }

        fn declining(mut self) -> Self {
            self.accepts = false;
            self
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn invocations(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventHandler for TestHandler {
        fn can_handle(&self, _: &EventType) -> bool {
            self.accepts
        }

        async fn handle(&self, _: &HandlerContext, _: &StoredEvent) -> Result<(), DomainError> {
            if let Some(delay) = self.delay {
                time::sleep(delay).await;
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(self.label);
            match self.fail_with {
                Some(message) => Err(DomainError::new(ErrorCode::HandlerFailed, message)),
                None => Ok(()),
            }
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn name(&self) -> &'static str {
            self.label
        }
    }

    fn pending(event_type: EventType) -> StoredEvent {
        StoredEvent::new(event_type, "session-1", "TalkSession", b"{}".to_vec())
    }

    fn new_log() -> Arc<Mutex<Vec<&'static str>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn processor(store: &Arc<TestEventStore>, registry: &Arc<HandlerRegistry>) -> EventProcessor {
        EventProcessor::new(store.clone(), registry.clone())
    }

    #[tokio::test]
    async fn empty_registry_skips_store() {
        let store = Arc::new(TestEventStore::with_pending(vec![pending(STARTED)]));
        let registry = Arc::new(HandlerRegistry::new());

        let outcome = processor(&store, &registry).process_batch().await;

        assert_eq!(outcome, BatchOutcome::default());
        assert_eq!(store.fetches(), 0);
    }

    #[tokio::test]
    async fn all_handlers_run_and_errors_are_aggregated() {
        let event = pending(STARTED);
        let id = event.id;
        let store = Arc::new(TestEventStore::with_pending(vec![event]));
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        let ok = Arc::new(TestHandler::new("ok", 100, &log));
        let boom = Arc::new(TestHandler::new("boom", 200, &log).failing("boom"));
        registry.register(STARTED, ok.clone());
        registry.register(STARTED, boom.clone());

        let outcome = processor(&store, &registry).process_batch().await;

        assert_eq!(outcome.failed, 1);
        assert_eq!(ok.invocations(), 1);
        assert_eq!(boom.invocations(), 1);
        assert_eq!(store.status_of(id), EventStatus::Failed);
        let reason = store.failure_reason_of(id).unwrap();
        assert!(reason.contains("boom"));
        assert!(reason.contains("priority=200"));
    }

    #[tokio::test]
    async fn every_failing_handler_is_reported() {
        let event = pending(STARTED);
        let id = event.id;
        let store = Arc::new(TestEventStore::with_pending(vec![event]));
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        registry.register(STARTED, Arc::new(TestHandler::new("first", 2, &log).failing("disk full")));
        registry.register(STARTED, Arc::new(TestHandler::new("second", 1, &log).failing("quota")));

        processor(&store, &registry).process_batch().await;

        let reason = store.failure_reason_of(id).unwrap();
        assert!(reason.contains("disk full"));
        assert!(reason.contains("quota"));
    }

    #[tokio::test]
    async fn handlers_run_in_priority_order() {
        let store = Arc::new(TestEventStore::with_pending(vec![pending(STARTED)]));
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        registry.register(STARTED, Arc::new(TestHandler::new("low", 10, &log)));
        registry.register(STARTED, Arc::new(TestHandler::new("high", 100, &log)));
        registry.register(STARTED, Arc::new(TestHandler::new("mid", 50, &log)));

        processor(&store, &registry).process_batch().await;

        assert_eq!(*log.lock().unwrap(), vec!["high", "mid", "low"]);
    }

    #[tokio::test]
    async fn declined_event_is_processed_without_side_effects() {
        let event = pending(STARTED);
        let id = event.id;
        let store = Arc::new(TestEventStore::with_pending(vec![event]));
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        let handler = Arc::new(TestHandler::new("picky", 1, &log).declining());
        registry.register(STARTED, handler.clone());

        let outcome = processor(&store, &registry).process_batch().await;

        assert_eq!(outcome.processed, 1);
        assert_eq!(handler.invocations(), 0);
        assert_eq!(store.status_of(id), EventStatus::Processed);
    }

    #[tokio::test]
    async fn event_without_handlers_counts_as_processed() {
        let store = Arc::new(TestEventStore::default());
        let registry = Arc::new(HandlerRegistry::new());
        registry.register(STARTED, Arc::new(TestHandler::new("started", 1, &new_log())));

        let outcome = processor(&store, &registry)
            .process_event(&pending(ENDED), None)
            .await;

        assert_eq!(outcome, EventOutcome::Processed);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_events_untouched() {
        let event = pending(STARTED);
        let id = event.id;
        let store = Arc::new(TestEventStore::with_pending(vec![event]));
        store.fail_fetch.store(true, Ordering::SeqCst);
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        let handler = Arc::new(TestHandler::new("h", 1, &log));
        registry.register(STARTED, handler.clone());
        let processor = processor(&store, &registry);

        let outcome = processor.process_batch().await;

        assert_eq!(outcome, BatchOutcome::default());
        assert_eq!(store.marks(), 0);
        assert_eq!(handler.invocations(), 0);

        store.fail_fetch.store(false, Ordering::SeqCst);
        let refetched = store.get_unprocessed_events(&[STARTED], 10).await.unwrap();
        assert_eq!(refetched.len(), 1);
        assert_eq!(refetched[0].id, id);
        assert_eq!(refetched[0].status, EventStatus::Pending);
    }

    #[tokio::test]
    async fn failed_mark_causes_redelivery() {
        let event = pending(STARTED);
        let id = event.id;
        let store = Arc::new(TestEventStore::with_pending(vec![event]));
        store.fail_marks.store(true, Ordering::SeqCst);
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        let handler = Arc::new(TestHandler::new("h", 1, &log));
        registry.register(STARTED, handler.clone());
        let processor = processor(&store, &registry);

        let first = processor.process_batch().await;
        assert_eq!(first.processed, 1);
        assert_eq!(first.mark_errors, 1);
        assert_eq!(store.status_of(id), EventStatus::Pending);

        store.fail_marks.store(false, Ordering::SeqCst);
        processor.process_batch().await;

        assert_eq!(handler.invocations(), 2);
        assert_eq!(store.status_of(id), EventStatus::Processed);
    }

    #[tokio::test]
    async fn batch_size_limits_fetch() {
        let events = (0..5).map(|_| pending(STARTED)).collect();
        let store = Arc::new(TestEventStore::with_pending(events));
        let registry = Arc::new(HandlerRegistry::new());
        registry.register(STARTED, Arc::new(TestHandler::new("h", 1, &new_log())));
        let config = EventProcessorConfig::default().with_batch_size(2);
        let processor = EventProcessor::with_config(store.clone(), registry, config);

        let outcome = processor.process_batch().await;

        assert_eq!(store.last_limit.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.fetched, 2);
        assert_eq!(outcome.processed, 2);
    }

    #[tokio::test]
    async fn empty_fetch_makes_no_mark_calls() {
        let store = Arc::new(TestEventStore::default());
        let registry = Arc::new(HandlerRegistry::new());
        registry.register(STARTED, Arc::new(TestHandler::new("h", 1, &new_log())));

        let outcome = processor(&store, &registry).process_batch().await;

        assert_eq!(store.fetches(), 1);
        assert_eq!(outcome.fetched, 0);
        assert_eq!(store.marks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_handler_times_out_and_event_fails() {
        let event = pending(STARTED);
        let id = event.id;
        let store = Arc::new(TestEventStore::with_pending(vec![event]));
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        registry.register(
            STARTED,
            Arc::new(TestHandler::new("sleepy", 1, &log).slow(Duration::from_secs(60))),
        );

        let outcome = processor(&store, &registry).process_batch().await;

        assert_eq!(outcome.failed, 1);
        assert_eq!(store.status_of(id), EventStatus::Failed);
        assert!(store.failure_reason_of(id).unwrap().contains("timed out"));
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_during_dispatch_leaves_event_pending() {
        let event = pending(STARTED);
        let id = event.id;
        let store = Arc::new(TestEventStore::with_pending(vec![event]));
        let registry = Arc::new(HandlerRegistry::new());
        let log = new_log();
        registry.register(
            STARTED,
            Arc::new(TestHandler::new("sleepy", 1, &log).slow(Duration::from_secs(20))),
        );
        let (tx, rx) = watch::channel(false);
        let handle = processor(&store, &registry).spawn(rx);

        time::sleep(Duration::from_secs(5)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(store.status_of(id), EventStatus::Pending);
        assert_eq!(store.marks(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn run_polls_immediately_then_every_interval() {
        let store = Arc::new(TestEventStore::default());
        let registry = Arc::new(HandlerRegistry::new());
        registry.register(STARTED, Arc::new(TestHandler::new("h", 1, &new_log())));
        let config = EventProcessorConfig::default().with_poll_interval(Duration::from_secs(10));
        let processor = EventProcessor::with_config(store.clone(), registry, config);
        let (tx, rx) = watch::channel(false);

        let handle = processor.spawn(rx);
        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.fetches(), 1);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(store.fetches(), 2);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn run_exits_when_sender_is_dropped() {
        let store = Arc::new(TestEventStore::default());
        let registry = Arc::new(HandlerRegistry::new());
        let (tx, rx) = watch::channel(false);
        let handle = processor(&store, &registry).spawn(rx);

        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("processor did not stop")
            .unwrap();
    }

    #[test]
    fn zero_poll_interval_is_raised_to_minimum() {
        let config = EventProcessorConfig::default().with_poll_interval(Duration::ZERO);

        assert_eq!(config.poll_interval, Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn run_tolerates_zero_interval_set_directly() {
        let store = Arc::new(TestEventStore::default());
        let registry = Arc::new(HandlerRegistry::new());
        registry.register(STARTED, Arc::new(TestHandler::new("h", 1, &new_log())));
        let config = EventProcessorConfig {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        let (tx, rx) = watch::channel(false);
        let handle = EventProcessor::with_config(store.clone(), registry, config).spawn(rx);

        time::sleep(Duration::from_millis(5)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(store.fetches() >= 2);
    }

    #[test]
    fn config_defaults_are_reasonable() {
        let config = EventProcessorConfig::default();

        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.handler_timeout, Duration::from_secs(30));
    }
}
