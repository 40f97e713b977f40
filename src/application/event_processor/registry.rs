//! HandlerRegistry - routes event types to priority-ordered handlers.
//!
//! Registration normally happens once at start-up while the processor loop
//! may already be reading, so every operation goes through a reader/writer
//! lock. The lock is only held to copy data in or out, never across an
//! `.await`.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::event::EventType;
use crate::ports::EventHandler;

type HandlerMap = HashMap<EventType, Vec<Arc<dyn EventHandler>>>;

/// Maps each event type to its handlers, highest priority first.
///
/// Handlers with equal priority keep their registration order (the sort is
/// stable), but callers should not depend on that.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HandlerMap>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `handler` for `event_type` and re-sorts that type's handlers.
    pub fn register(&self, event_type: EventType, handler: Arc<dyn EventHandler>) {
        let mut handlers = self.write();
        let list = handlers.entry(event_type).or_default();
        list.push(handler);
        list.sort_by_key(|h| Reverse(h.priority()));
    }

    /// Registers the same handler instance for several event types.
    pub fn register_all(&self, event_types: &[EventType], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.register(event_type.clone(), Arc::clone(&handler));
        }
    }

    /// Returns a snapshot of the handlers for `event_type`.
    ///
    /// The returned vector is a copy: later registrations do not show up in
    /// it and changing it does not touch the registry.
    pub fn handlers(&self, event_type: &EventType) -> Vec<Arc<dyn EventHandler>> {
        self.read().get(event_type).cloned().unwrap_or_default()
    }

    /// Event types with at least one handler, sorted by tag.
    pub fn registered_event_types(&self) -> Vec<EventType> {
        let handlers = self.read();
        let mut types: Vec<EventType> = handlers
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(event_type, _)| event_type.clone())
            .collect();
        types.sort();
        types
    }

    /// Drops every registration. Mostly useful in tests.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.read().values().all(Vec::is_empty)
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HandlerMap> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HandlerMap> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.read();
        let mut map = f.debug_map();
        for (event_type, list) in handlers.iter() {
            let names: Vec<_> = list.iter().map(|h| (h.name(), h.priority())).collect();
            map.entry(&event_type.as_str(), &names);
        }
        map.finish()
    }
}
