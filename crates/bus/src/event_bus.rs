//! Event bus - publish/subscribe fan-out between modules
//!
//! Subscribers register per event type and are called in subscription order.
//! Every subscriber receives the full [`Event`] record (type, source, payload
//! and timestamp). A failing or panicking subscriber is logged and skipped; it
//! never stops delivery to the ones after it. There is no unsubscribe and no
//! retry.
//!
//! The bus is a cheap cloneable handle; clones share one subscriber table.
//! Subscribers may publish or subscribe from inside a callback: delivery works
//! on a snapshot of the subscriber list taken when `publish` starts.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::now_iso8601;

/// One published event. Immutable once built; not retained after delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event: String,
    pub source: String,
    pub payload: Value,
    /// ISO-8601 UTC, second precision.
    pub timestamp: String,
}

pub type Subscriber = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync>;

#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<IndexMap<String, Vec<Subscriber>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, IndexMap<String, Vec<Subscriber>>> {
        // A poisoned table is still structurally valid; keep delivering.
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append `callback` to the subscribers of `event_type`. No deduplication.
    pub fn subscribe<F>(&self, event_type: &str, callback: F)
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.table()
            .entry(event_type.to_string())
            .or_default()
            .push(Arc::new(callback));
        log::debug!("subscriber added for {event_type}");
    }

    /// Stamp and deliver an event to every subscriber of `event_type`, in order.
    ///
    /// Returns how many subscribers handled it without error. Publishing with no
    /// subscribers is a no-op.
    pub fn publish(&self, event_type: &str, source: &str, payload: Value) -> usize {
        let subscribers: Vec<Subscriber> = match self.table().get(event_type) {
            Some(list) if !list.is_empty() => list.clone(),
            _ => return 0,
        };

        let event = Event {
            event: event_type.to_string(),
            source: source.to_string(),
            payload,
            timestamp: now_iso8601(),
        };

        let mut delivered = 0;
        for (index, subscriber) in subscribers.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| subscriber(&event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(err)) => {
                    log::error!("subscriber #{index} for {event_type} failed: {err:#}");
                }
                Err(_) => {
                    log::error!("subscriber #{index} for {event_type} panicked");
                }
            }
        }
        log::debug!("{event_type} from {source} delivered to {delivered}/{}", subscribers.len());
        delivered
    }

    pub fn subscriber_count(&self, event_type: &str) -> usize {
        self.table().get(event_type).map_or(0, Vec::len)
    }

    /// Event types with at least one subscriber, in first-subscription order.
    pub fn event_types(&self) -> Vec<String> {
        self.table().keys().cloned().collect()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("event_types", &self.event_types())
            .finish()
    }
}
