use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use studio_core::clock::Clock;
use studio_core::types::Timestamp;
use studio_events::{EventBus, StudioEvent};
use studio_store::Store;
use tokio::sync::{Mutex, MutexGuard};

use crate::channel::MessageChannel;
use crate::config::AppConfig;

/// Shared application state handed to every service.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub event_bus: Arc<EventBus>,
    pub clock: Arc<dyn Clock>,
    pub channel: Arc<dyn MessageChannel>,
    writes: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        config: Arc<AppConfig>,
        event_bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
        channel: Arc<dyn MessageChannel>,
    ) -> Self {
        Self {
            store,
            config,
            event_bus,
            clock,
            channel,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Serializes read-modify-write sequences across tasks. Hold the guard
    /// from the first read to the last write of one logical change.
    pub async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().await
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.config.utc_offset())
    }

    /// Publish with the injected clock's timestamp.
    pub fn publish(&self, event: StudioEvent) {
        self.event_bus.publish(event.at(self.clock.now()));
    }
}
